//! Spectral analysis of the decay matrix

use super::Chemistry;
use crate::error::{LookAndSayError, Result};
use crate::polynomial::{CharacteristicPolynomial, IntPolynomial};
use log::{debug, info};
use nalgebra::linalg::Schur;
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;

const MAX_ITERATIONS: usize = 10_000;
const INVERSE_ITERATIONS: usize = 8;
/// Relative offset of the inverse iteration shift from the eigenvalue
const SHIFT_OFFSET: f64 = 1e-10;

/// Dominant eigenpair, with the eigenvector keyed by element string so it
/// outlives reordering
#[derive(Debug, Clone)]
pub(crate) struct Spectrum {
    eigenvalue: f64,
    vector: HashMap<String, f64>,
}

/// Largest real part among the eigenvalues of `matrix`
fn dominant_eigenvalue(matrix: &DMatrix<f64>) -> Result<f64> {
    let schur = Schur::try_new(matrix.clone(), f64::EPSILON, MAX_ITERATIONS)
        .ok_or(LookAndSayError::EigenDecomposition)?;
    schur
        .complex_eigenvalues()
        .iter()
        .map(|z| z.re)
        .max_by(f64::total_cmp)
        .ok_or(LookAndSayError::NoElements)
}

/// Eigenvector of `matrix` for `eigenvalue`, scaled to unit sum
fn dominant_eigenvector(matrix: &DMatrix<f64>, eigenvalue: f64) -> Result<DVector<f64>> {
    let n = matrix.nrows();
    let vector = inverse_iteration(matrix, eigenvalue).or_else(|| {
        debug!("Inverse iteration failed, falling back to SVD");
        null_vector(matrix, eigenvalue)
    });
    let vector = vector.ok_or(LookAndSayError::EigenDecomposition)?;
    let sum = vector.sum();
    if sum.abs() < f64::EPSILON * n as f64 {
        return Err(LookAndSayError::EigenDecomposition);
    }
    Ok(vector / sum)
}

fn inverse_iteration(matrix: &DMatrix<f64>, eigenvalue: f64) -> Option<DVector<f64>> {
    let n = matrix.nrows();
    let shift = eigenvalue + SHIFT_OFFSET * eigenvalue.abs().max(1.0);
    let lu = (matrix - DMatrix::identity(n, n) * shift).lu();
    let mut vector = DVector::from_element(n, 1.0 / n as f64);
    for _ in 0..INVERSE_ITERATIONS {
        let next = lu.solve(&vector)?;
        let norm = next.norm();
        if !norm.is_finite() || norm == 0.0 {
            return None;
        }
        vector = next / norm;
    }
    Some(vector)
}

/// Right singular vector of `matrix - eigenvalue * I` with the smallest
/// singular value
fn null_vector(matrix: &DMatrix<f64>, eigenvalue: f64) -> Option<DVector<f64>> {
    let n = matrix.nrows();
    let shifted = matrix - DMatrix::identity(n, n) * eigenvalue;
    let svd = shifted.try_svd(false, true, f64::EPSILON, MAX_ITERATIONS)?;
    let v_t = svd.v_t?;
    let (smallest, _) = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))?;
    Some(v_t.row(smallest).transpose())
}

fn round_to(value: f64, decimal_places: u32) -> f64 {
    let scale = 10f64.powi(decimal_places as i32);
    (value * scale).round() / scale
}

impl Chemistry {
    fn ensure_spectrum(&mut self) -> Result<&Spectrum> {
        self.compute_spectrum()?;
        self.spectrum.as_ref().ok_or(LookAndSayError::EigenDecomposition)
    }

    fn compute_spectrum(&mut self) -> Result<()> {
        if self.elements.is_empty() {
            return Err(LookAndSayError::NoElements);
        }
        if self.spectrum.is_none() {
            debug!("Spectrum cache miss for {} elements", self.elements.len());
            let matrix = self.decay_matrix().map(f64::from);
            let eigenvalue = dominant_eigenvalue(&matrix)?;
            let eigenvector = dominant_eigenvector(&matrix, eigenvalue)?;
            info!("Dominant eigenvalue: {:.12}", eigenvalue);
            let vector = self
                .elements
                .iter()
                .map(|e| e.string().to_string())
                .zip(eigenvector.iter().copied())
                .collect();
            self.spectrum = Some(Spectrum { eigenvalue, vector });
        } else {
            debug!("Spectrum cache hit");
        }
        Ok(())
    }

    /// Asymptotic growth rate of string length under the say rule
    pub fn dominant_eigenvalue(&mut self) -> Result<f64> {
        Ok(self.ensure_spectrum()?.eigenvalue)
    }

    /// Limiting proportion of each element, in the current element order,
    /// summing to `normalization_sum` before rounding
    pub fn abundances(&mut self, decimal_places: u32, normalization_sum: f64) -> Result<Vec<f64>> {
        self.compute_spectrum()?;
        let spectrum = self.spectrum.as_ref().ok_or(LookAndSayError::EigenDecomposition)?;
        let total: f64 = spectrum.vector.values().sum();
        let abundances = self
            .elements
            .iter()
            .map(|e| {
                let component = spectrum.vector.get(e.string()).copied().unwrap_or(0.0);
                round_to(component * normalization_sum / total, decimal_places).abs()
            })
            .collect();
        Ok(abundances)
    }

    /// Characteristic polynomial of the decay matrix, exact over the integers
    pub fn characteristic_polynomial(&self, factor: bool) -> Result<CharacteristicPolynomial> {
        if self.elements.is_empty() {
            return Err(LookAndSayError::NoElements);
        }
        let polynomial = IntPolynomial::characteristic(&self.decay_matrix())?;
        Ok(if factor {
            CharacteristicPolynomial::Factored(polynomial.factor())
        } else {
            CharacteristicPolynomial::Expanded(polynomial)
        })
    }
}

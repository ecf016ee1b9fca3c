//! Exact integer polynomials for decay matrices
//!
//! The characteristic polynomial `det(λI - A)` is computed with Berkowitz's
//! division-free algorithm in checked 128-bit arithmetic, so every
//! coefficient is exact or the computation fails loudly.
//!
//! Factoring over the integers lives in [`factor`](IntPolynomial::factor).

mod factor;
mod modular;

use crate::error::{LookAndSayError, Result};
use nalgebra::DMatrix;
use serde::Serialize;
use std::fmt;

/// Name of the variable when rendering
pub const VARIABLE: &str = "lambda";

/// Polynomial with integer coefficients, lowest degree first
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IntPolynomial {
    coefficients: Vec<i128>,
}

impl IntPolynomial {
    /// `coefficients[k]` multiplies `λ^k`
    pub fn new(mut coefficients: Vec<i128>) -> Self {
        while coefficients.last() == Some(&0) {
            coefficients.pop();
        }
        Self { coefficients }
    }

    /// `λ - root`
    pub fn linear(root: i128) -> Self {
        Self::new(vec![-root, 1])
    }

    pub fn coefficients(&self) -> &[i128] {
        &self.coefficients
    }

    /// `None` for the zero polynomial
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Characteristic polynomial `det(λI - A)` of a square matrix
    pub fn characteristic(matrix: &DMatrix<u32>) -> Result<Self> {
        let n = matrix.nrows();
        if n == 0 {
            return Ok(Self::new(vec![1]));
        }
        let m = matrix.map(i128::from);

        // Berkowitz: walk up the trailing principal submatrices. `poly`
        // holds the characteristic polynomial of m[k+1.., k+1..], highest
        // degree first.
        let mut poly = vec![1, -m[(n - 1, n - 1)]];
        for k in (0..n - 1).rev() {
            let size = n - k - 1;
            let mut toeplitz = Vec::with_capacity(size + 2);
            toeplitz.push(1);
            toeplitz.push(-m[(k, k)]);

            // -R A^j C for j = 0..size
            let mut column: Vec<i128> = (k + 1..n).map(|i| m[(i, k)]).collect();
            for j in 0..size {
                let dot = checked_dot((k + 1..n).map(|c| m[(k, c)]), &column)?;
                toeplitz.push(dot.checked_neg().ok_or(LookAndSayError::PolynomialOverflow)?);
                if j + 1 < size {
                    column = (k + 1..n)
                        .map(|r| checked_dot((k + 1..n).map(|c| m[(r, c)]), &column))
                        .collect::<Result<_>>()?;
                }
            }

            let mut next = vec![0i128; size + 2];
            for (i, slot) in next.iter_mut().enumerate() {
                for j in 0..=i.min(size) {
                    let term = toeplitz[i - j]
                        .checked_mul(poly[j])
                        .ok_or(LookAndSayError::PolynomialOverflow)?;
                    *slot = slot
                        .checked_add(term)
                        .ok_or(LookAndSayError::PolynomialOverflow)?;
                }
            }
            poly = next;
        }

        poly.reverse();
        Ok(Self::new(poly))
    }

    /// Value at `x`, `None` on overflow
    pub fn eval(&self, x: i128) -> Option<i128> {
        self.coefficients
            .iter()
            .rev()
            .try_fold(0i128, |acc, &c| acc.checked_mul(x)?.checked_add(c))
    }

    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        if self.is_zero() || other.is_zero() {
            return Ok(Self::new(Vec::new()));
        }
        let mut product = vec![0i128; self.coefficients.len() + other.coefficients.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            for (j, &b) in other.coefficients.iter().enumerate() {
                product[i + j] = a
                    .checked_mul(b)
                    .and_then(|ab| product[i + j].checked_add(ab))
                    .ok_or(LookAndSayError::PolynomialOverflow)?;
            }
        }
        Ok(Self::new(product))
    }

    fn nonzero_terms(&self) -> usize {
        self.coefficients.iter().filter(|&&c| c != 0).count()
    }

    pub fn to_latex(&self) -> String {
        render_terms(&self.coefficients, Notation::Latex)
    }
}

impl fmt::Display for IntPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_terms(&self.coefficients, Notation::Plain))
    }
}

/// One factor of a [`Factorization`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Factor {
    pub polynomial: IntPolynomial,
    pub multiplicity: u32,
    /// Whether the polynomial is proven irreducible over the integers.
    /// `false` means the search for a splitting gave up, not that one exists.
    pub irreducible: bool,
}

impl Factor {
    fn proven(polynomial: IntPolynomial, multiplicity: u32) -> Self {
        Self {
            polynomial,
            multiplicity,
            irreducible: true,
        }
    }
}

/// `unit * Π factor^multiplicity`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Factorization {
    pub unit: i128,
    pub factors: Vec<Factor>,
}

impl Factorization {
    /// Multiply the factors back out
    pub fn expand(&self) -> Result<IntPolynomial> {
        let mut product = IntPolynomial::new(vec![self.unit]);
        for factor in &self.factors {
            for _ in 0..factor.multiplicity {
                product = product.checked_mul(&factor.polynomial)?;
            }
        }
        Ok(product)
    }

    /// Every factor is proven irreducible
    pub fn is_complete(&self) -> bool {
        self.factors.iter().all(|f| f.irreducible)
    }

    pub fn to_latex(&self) -> String {
        self.render(Notation::Latex)
    }

    fn render(&self, notation: Notation) -> String {
        let alone = self.unit == 1 && self.factors.len() == 1;
        let pieces: Vec<String> = self
            .factors
            .iter()
            .map(|factor| {
                let multiplicity = factor.multiplicity;
                let body = render_terms(&factor.polynomial.coefficients, notation);
                let body = if factor.polynomial.nonzero_terms() > 1 && !(alone && multiplicity == 1) {
                    match notation {
                        Notation::Plain => format!("({body})"),
                        Notation::Latex => format!("\\left({body}\\right)"),
                    }
                } else {
                    body
                };
                match (multiplicity, notation) {
                    (1, _) => body,
                    (m, Notation::Plain) => format!("{body}**{m}"),
                    (m, Notation::Latex) => format!("{body}^{{{m}}}"),
                }
            })
            .collect();
        let separator = match notation {
            Notation::Plain => "*",
            Notation::Latex => " ",
        };
        let product = pieces.join(separator);
        match (self.unit, product.is_empty()) {
            (unit, true) => unit.to_string(),
            (1, false) => product,
            (-1, false) => format!("-{product}"),
            (unit, false) => format!("{unit}{separator}{product}"),
        }
    }
}

impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Notation::Plain))
    }
}

/// A characteristic polynomial, expanded or factored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CharacteristicPolynomial {
    Expanded(IntPolynomial),
    Factored(Factorization),
}

impl CharacteristicPolynomial {
    pub fn to_latex(&self) -> String {
        match self {
            CharacteristicPolynomial::Expanded(p) => p.to_latex(),
            CharacteristicPolynomial::Factored(f) => f.to_latex(),
        }
    }

    pub fn expanded(&self) -> Result<IntPolynomial> {
        match self {
            CharacteristicPolynomial::Expanded(p) => Ok(p.clone()),
            CharacteristicPolynomial::Factored(f) => f.expand(),
        }
    }
}

impl fmt::Display for CharacteristicPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacteristicPolynomial::Expanded(p) => p.fmt(f),
            CharacteristicPolynomial::Factored(factored) => factored.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notation {
    Plain,
    Latex,
}

fn power(degree: usize, notation: Notation) -> String {
    match (degree, notation) {
        (0, _) => String::new(),
        (1, Notation::Plain) => VARIABLE.to_string(),
        (1, Notation::Latex) => format!("\\{VARIABLE}"),
        (d, Notation::Plain) => format!("{VARIABLE}**{d}"),
        (d, Notation::Latex) => format!("\\{VARIABLE}^{{{d}}}"),
    }
}

fn render_terms(coefficients: &[i128], notation: Notation) -> String {
    let mut out = String::new();
    for (degree, &c) in coefficients.iter().enumerate().rev() {
        if c == 0 {
            continue;
        }
        if out.is_empty() {
            if c < 0 {
                out.push('-');
            }
        } else {
            out.push_str(if c < 0 { " - " } else { " + " });
        }
        let magnitude = c.unsigned_abs();
        let term = match (magnitude, degree, notation) {
            (m, 0, _) => m.to_string(),
            (1, d, _) => power(d, notation),
            (m, d, Notation::Plain) => format!("{m}*{}", power(d, notation)),
            (m, d, Notation::Latex) => format!("{m} {}", power(d, notation)),
        };
        out.push_str(&term);
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

fn checked_dot(row: impl Iterator<Item = i128>, column: &[i128]) -> Result<i128> {
    row.zip(column)
        .filter(|(a, b)| *a != 0 && **b != 0)
        .try_fold(0i128, |acc, (a, &b)| a.checked_mul(b)?.checked_add(acc))
        .ok_or(LookAndSayError::PolynomialOverflow)
}

fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_highest(coefficients: &[i128]) -> IntPolynomial {
        IntPolynomial::new(coefficients.iter().rev().copied().collect())
    }

    #[test]
    fn test_golden_ratio_matrix() {
        let m = DMatrix::from_row_slice(2, 2, &[0u32, 1, 1, 1]);
        let p = IntPolynomial::characteristic(&m).unwrap();
        assert_eq!(p, from_highest(&[1, -1, -1]));
        assert_eq!(p.to_string(), "lambda**2 - lambda - 1");
    }

    #[test]
    fn test_three_by_three() {
        let m = DMatrix::from_row_slice(3, 3, &[2u32, 0, 0, 0, 3, 4, 0, 4, 9]);
        let p = IntPolynomial::characteristic(&m).unwrap();
        assert_eq!(p, from_highest(&[1, -14, 35, -22]));
        assert_eq!(p.eval(1), Some(0));
        assert_eq!(p.eval(2), Some(0));
        assert_eq!(p.eval(11), Some(0));
        assert_eq!(p.factor().to_string(), "(lambda - 1)*(lambda - 2)*(lambda - 11)");
    }

    #[test]
    fn test_empty_matrix() {
        let m = DMatrix::<u32>::zeros(0, 0);
        assert_eq!(IntPolynomial::characteristic(&m).unwrap(), IntPolynomial::new(vec![1]));
    }

    #[test]
    fn test_overflow_is_reported() {
        let m = DMatrix::from_element(8, 8, u32::MAX);
        assert!(matches!(
            IntPolynomial::characteristic(&m),
            Err(LookAndSayError::PolynomialOverflow)
        ));
    }

    #[test]
    fn test_factor_binary_chemistry_polynomial() {
        let p = from_highest(&[1, -2, 0, 1, 0, 1, -1, 0, 0, 0, 0]);
        let f = p.factor();
        assert_eq!(
            f.to_string(),
            "lambda**4*(lambda - 1)**2*(lambda + 1)*(lambda**3 - lambda**2 - 1)"
        );
        assert_eq!(
            f.to_latex(),
            "\\lambda^{4} \\left(\\lambda - 1\\right)^{2} \\left(\\lambda + 1\\right) \\left(\\lambda^{3} - \\lambda^{2} - 1\\right)"
        );
        assert_eq!(f.expand().unwrap(), p);
    }

    #[test]
    fn test_factor_content_and_sign() {
        let p = from_highest(&[-2, 0, 2]);
        let f = p.factor();
        assert_eq!(f.unit, -2);
        assert_eq!(f.to_string(), "-2*(lambda - 1)*(lambda + 1)");
        assert_eq!(f.expand().unwrap(), p);
    }

    #[test]
    fn test_irreducible_stays_whole() {
        let p = from_highest(&[1, 0, 1]);
        let f = p.factor();
        assert_eq!(f.factors, vec![Factor::proven(p.clone(), 1)]);
        assert_eq!(f.to_string(), "lambda**2 + 1");
    }

    #[test]
    fn test_rendering() {
        assert_eq!(from_highest(&[2, -1, 3]).to_string(), "2*lambda**2 - lambda + 3");
        assert_eq!(from_highest(&[-1, 0, 0]).to_string(), "-lambda**2");
        assert_eq!(from_highest(&[2, -1, 3]).to_latex(), "2 \\lambda^{2} - \\lambda + 3");
        assert_eq!(IntPolynomial::new(vec![0, 0]).to_string(), "0");
        assert_eq!(IntPolynomial::new(vec![7]).to_string(), "7");
    }
}

//! Factoring integer polynomials
//!
//! Content, powers of `λ` and integer roots come off first. What is left is
//! split into square-free parts, and each part is split with Kronecker's
//! method, restricted to the factor degrees that survive reduction modulo
//! small primes.

use super::{gcd, modular, Factor, Factorization, IntPolynomial};
use log::debug;

/// Largest integer root ever tried
const ROOT_SEARCH_LIMIT: i128 = 1 << 20;

/// Candidate tuples Kronecker's method may try for one degree
const KRONECKER_BUDGET: u128 = 200_000;

/// Values whose divisors are too costly to enumerate
const DIVISOR_LIMIT: i128 = 1_000_000_000_000;

enum Search {
    Found(IntPolynomial, IntPolynomial),
    Exhausted,
    GaveUp,
}

impl IntPolynomial {
    /// Factor over the integers. Expanding the result always gives back
    /// `self`; factors the search could not settle carry
    /// `irreducible: false`.
    pub fn factor(&self) -> Factorization {
        if self.is_zero() {
            return Factorization {
                unit: 0,
                factors: Vec::new(),
            };
        }
        let content = self.content();
        let mut rest = self.primitive();
        let mut factors = Vec::new();

        let zeros = rest.coefficients.iter().take_while(|&&c| c == 0).count();
        if zeros > 0 {
            factors.push(Factor::proven(Self::new(vec![0, 1]), zeros as u32));
            rest = Self::new(rest.coefficients[zeros..].to_vec());
        }

        for root in rest.root_candidates() {
            let mut multiplicity = 0u32;
            while let Some(quotient) = rest.divide_by_root(root) {
                rest = quotient;
                multiplicity += 1;
            }
            if multiplicity > 0 {
                factors.push(Factor::proven(Self::linear(root), multiplicity));
            }
        }

        if rest.degree().is_some_and(|d| d > 0) {
            let mut pieces = Vec::new();
            for (part, multiplicity) in rest.square_free_parts() {
                for (polynomial, irreducible) in part.split_square_free() {
                    pieces.push(Factor {
                        polynomial,
                        multiplicity,
                        irreducible,
                    });
                }
            }
            pieces.sort_by(|a, b| {
                a.polynomial.degree().cmp(&b.polynomial.degree()).then_with(|| {
                    let a = a.polynomial.coefficients.iter().rev();
                    a.cmp(b.polynomial.coefficients.iter().rev())
                })
            });
            factors.extend(pieces);
        }
        Factorization {
            unit: content,
            factors,
        }
    }

    /// Exact quotient by `λ - root`, `None` if `root` is not a root
    fn divide_by_root(&self, root: i128) -> Option<Self> {
        let n = self.coefficients.len();
        if n < 2 {
            return None;
        }
        let mut quotient = vec![0i128; n - 1];
        let mut carry = 0i128;
        for k in (1..n).rev() {
            carry = carry.checked_mul(root)?.checked_add(self.coefficients[k])?;
            quotient[k - 1] = carry;
        }
        let remainder = carry.checked_mul(root)?.checked_add(self.coefficients[0])?;
        (remainder == 0).then(|| Self::new(quotient))
    }

    /// Integer root candidates: divisors of the constant term inside the
    /// Fujiwara bound, smallest magnitude first, positive before negative
    fn root_candidates(&self) -> Vec<i128> {
        let Some(n) = self.degree().filter(|&n| n > 0) else {
            return Vec::new();
        };
        let constant = self.coefficients[0];
        if constant == 0 {
            return vec![0];
        }
        let leading = self.coefficients[n].unsigned_abs() as f64;
        let bound = (1..=n)
            .map(|i| (self.coefficients[n - i].unsigned_abs() as f64 / leading).powf(1.0 / i as f64))
            .fold(0.0f64, f64::max)
            * 2.0;
        let limit = (bound.ceil() as i128).clamp(1, ROOT_SEARCH_LIMIT);
        (1..=limit)
            .filter(|d| constant % d == 0)
            .flat_map(|d| [d, -d])
            .collect()
    }

    /// Gcd of the coefficients, signed like the leading one; 0 for zero
    fn content(&self) -> i128 {
        let content = self.coefficients.iter().fold(0i128, |g, &c| gcd(g, c));
        match self.coefficients.last() {
            Some(&lead) if lead < 0 => -content,
            _ => content,
        }
    }

    /// Divided by its content, so the leading coefficient is positive
    fn primitive(&self) -> Self {
        match self.content() {
            0 => self.clone(),
            content => Self::new(self.coefficients.iter().map(|c| c / content).collect()),
        }
    }

    fn derivative(&self) -> Option<Self> {
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, &c)| c.checked_mul(k as i128))
            .collect::<Option<_>>()?;
        Some(Self::new(coefficients))
    }

    /// `self + scale * other`
    fn add_scaled(&self, other: &Self, scale: i128) -> Option<Self> {
        let len = self.coefficients.len().max(other.coefficients.len());
        let coefficients = (0..len)
            .map(|i| {
                let a = self.coefficients.get(i).copied().unwrap_or(0);
                let b = other.coefficients.get(i).copied().unwrap_or(0);
                b.checked_mul(scale)?.checked_add(a)
            })
            .collect::<Option<_>>()?;
        Some(Self::new(coefficients))
    }

    /// Quotient when `divisor` divides `self` over the integers
    fn exact_div(&self, divisor: &Self) -> Option<Self> {
        let m = divisor.degree()?;
        let lead = divisor.coefficients[m];
        let Some(n) = self.degree() else {
            return Some(Self::new(Vec::new()));
        };
        if n < m {
            return None;
        }
        let mut remainder = self.coefficients.clone();
        let mut quotient = vec![0i128; n - m + 1];
        for shift in (0..=n - m).rev() {
            let top = remainder[shift + m];
            if top % lead != 0 {
                return None;
            }
            let q = top / lead;
            quotient[shift] = q;
            for (i, &c) in divisor.coefficients.iter().enumerate() {
                remainder[shift + i] = remainder[shift + i].checked_sub(q.checked_mul(c)?)?;
            }
        }
        remainder
            .iter()
            .all(|&c| c == 0)
            .then(|| Self::new(quotient))
    }

    /// Remainder of `self` by `divisor` up to a constant factor, kept
    /// primitive after every step
    fn pseudo_remainder(&self, divisor: &Self) -> Option<Self> {
        let m = divisor.degree()?;
        let lead = divisor.coefficients[m];
        let mut remainder = self.clone();
        while let Some(n) = remainder.degree().filter(|&n| n >= m) {
            let top = remainder.coefficients[n];
            let g = gcd(lead, top);
            let mut shifted = vec![0i128; n - m];
            shifted.extend_from_slice(&divisor.coefficients);
            let scaled = Self::new(Vec::new()).add_scaled(&remainder, lead / g)?;
            remainder = scaled.add_scaled(&Self::new(shifted), -(top / g))?.primitive();
        }
        Some(remainder)
    }

    /// Primitive greatest common divisor with a positive leading coefficient
    fn common_divisor(&self, other: &Self) -> Option<Self> {
        let (mut a, mut b) = (self.primitive(), other.primitive());
        if a.degree() < b.degree() {
            std::mem::swap(&mut a, &mut b);
        }
        while !b.is_zero() {
            let remainder = a.pseudo_remainder(&b)?;
            a = b;
            b = remainder;
        }
        Some(a.primitive())
    }

    /// Yun's square-free decomposition of a primitive polynomial
    fn yun(&self) -> Option<Vec<(Self, u32)>> {
        let derivative = self.derivative()?;
        let repeated = self.common_divisor(&derivative)?;
        let mut b = self.exact_div(&repeated)?;
        let c = derivative.exact_div(&repeated)?;
        let mut d = c.add_scaled(&b.derivative()?, -1)?;
        let mut parts = Vec::new();
        let mut multiplicity = 1;
        while b.degree().is_some_and(|n| n > 0) {
            let part = b.common_divisor(&d)?;
            b = b.exact_div(&part)?;
            let c = d.exact_div(&part)?;
            d = c.add_scaled(&b.derivative()?, -1)?;
            if part.degree().is_some_and(|n| n > 0) {
                parts.push((part, multiplicity));
            }
            multiplicity += 1;
        }
        Some(parts)
    }

    fn square_free_parts(&self) -> Vec<(Self, u32)> {
        if modular::square_free_mod_some_prime(&self.coefficients) {
            return vec![(self.clone(), 1)];
        }
        self.yun().unwrap_or_else(|| {
            debug!("Square-free decomposition overflowed at degree {:?}", self.degree());
            vec![(self.clone(), 1)]
        })
    }

    /// Irreducible pieces of a square-free polynomial, each flagged with
    /// whether the search proved it irreducible
    fn split_square_free(&self) -> Vec<(Self, bool)> {
        let Some(n) = self.degree() else {
            return Vec::new();
        };
        if n <= 1 {
            return vec![(self.clone(), true)];
        }
        let allowed = modular::possible_factor_degrees(&self.coefficients);
        for d in (1..=n / 2).filter(|&d| allowed[d]) {
            match self.kronecker(d) {
                Search::Found(factor, cofactor) => {
                    let mut pieces = factor.split_square_free();
                    pieces.extend(cofactor.split_square_free());
                    return pieces;
                }
                Search::Exhausted => {}
                Search::GaveUp => {
                    debug!("Gave up splitting degree {n} at factor degree {d}");
                    return vec![(self.clone(), false)];
                }
            }
        }
        vec![(self.clone(), true)]
    }

    /// Look for a factor of degree `d` among the polynomials through
    /// `(x, v_x)` for `x = 0..=d`, where each `v_x` divides `self(x)`
    fn kronecker(&self, d: usize) -> Search {
        let mut choices = Vec::with_capacity(d + 1);
        let mut combinations: u128 = 1;
        for x in 0..=d as i128 {
            let Some(value) = self.eval(x) else {
                return Search::GaveUp;
            };
            if value == 0 {
                let linear = Self::linear(x);
                return match self.exact_div(&linear) {
                    Some(cofactor) => Search::Found(linear, cofactor),
                    None => Search::GaveUp,
                };
            }
            let Some(positive) = divisors(value) else {
                return Search::GaveUp;
            };
            // a factor and its negation are the same factor
            let options: Vec<i128> = if x == 0 {
                positive
            } else {
                positive.iter().flat_map(|&v| [v, -v]).collect()
            };
            combinations = combinations.saturating_mul(options.len() as u128);
            if combinations > KRONECKER_BUDGET {
                return Search::GaveUp;
            }
            choices.push(options);
        }

        let mut index = vec![0usize; choices.len()];
        let mut values = vec![0i128; choices.len()];
        loop {
            for (slot, (options, &i)) in values.iter_mut().zip(choices.iter().zip(&index)) {
                *slot = options[i];
            }
            if let Some(candidate) = interpolate(&values).filter(|c| c.degree() == Some(d)) {
                let candidate = candidate.primitive();
                if let Some(cofactor) = self.exact_div(&candidate) {
                    return Search::Found(candidate, cofactor);
                }
            }
            let mut position = 0;
            loop {
                if position == index.len() {
                    return Search::Exhausted;
                }
                index[position] += 1;
                if index[position] < choices[position].len() {
                    break;
                }
                index[position] = 0;
                position += 1;
            }
        }
    }
}

/// Positive divisors in ascending order, `None` past [`DIVISOR_LIMIT`]
fn divisors(value: i128) -> Option<Vec<i128>> {
    let m = value.checked_abs()?;
    if m == 0 || m > DIVISOR_LIMIT {
        return None;
    }
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut k = 1;
    while k * k <= m {
        if m % k == 0 {
            small.push(k);
            if k * k != m {
                large.push(m / k);
            }
        }
        k += 1;
    }
    small.extend(large.into_iter().rev());
    Some(small)
}

/// Integer polynomial through `(x, values[x])`, from forward differences in
/// the falling-factorial basis. `None` if the coefficients are not integers.
fn interpolate(values: &[i128]) -> Option<IntPolynomial> {
    let mut differences = values.to_vec();
    let mut result = IntPolynomial::new(Vec::new());
    let mut falling = IntPolynomial::new(vec![1]);
    let mut factorial = 1i128;
    for k in 0..values.len() {
        if k > 0 {
            for i in 0..values.len() - k {
                differences[i] = differences[i + 1].checked_sub(differences[i])?;
            }
            factorial = factorial.checked_mul(k as i128)?;
            falling = falling.checked_mul(&IntPolynomial::linear(k as i128 - 1)).ok()?;
        }
        if differences[0] % factorial != 0 {
            return None;
        }
        result = result.add_scaled(&falling, differences[0] / factorial)?;
    }
    Some(result)
}

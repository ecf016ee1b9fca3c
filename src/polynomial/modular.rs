//! Polynomials over small prime fields
//!
//! Reducing an integer polynomial modulo `p` and reading off the degrees of
//! its irreducible factors there bounds the degrees its factors over the
//! integers can have. A few primes usually pin that down to "irreducible".

/// Primes tried, smallest first
const PRIMES: [u64; 24] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Usable primes consulted before settling on the degrees found so far
const MAX_PATTERNS: usize = 12;

/// Polynomial over `F_p`, lowest degree first, without trailing zeros
#[derive(Debug, Clone, PartialEq, Eq)]
struct ModPoly {
    p: u64,
    coefficients: Vec<u64>,
}

fn pow_mod(mut base: u64, mut exp: u64, p: u64) -> u64 {
    let mut result = 1;
    base %= p;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % p;
        }
        base = base * base % p;
        exp >>= 1;
    }
    result
}

fn inverse(a: u64, p: u64) -> u64 {
    pow_mod(a, p - 2, p)
}

impl ModPoly {
    fn new(mut coefficients: Vec<u64>, p: u64) -> Self {
        for c in coefficients.iter_mut() {
            *c %= p;
        }
        while coefficients.last() == Some(&0) {
            coefficients.pop();
        }
        Self { p, coefficients }
    }

    fn from_integers(coefficients: &[i128], p: u64) -> Self {
        let modulus = i128::from(p);
        // rem_euclid keeps the residue in 0..p, which fits u64
        let reduced = coefficients
            .iter()
            .map(|c| c.rem_euclid(modulus) as u64)
            .collect();
        Self::new(reduced, p)
    }

    fn x(p: u64) -> Self {
        Self::new(vec![0, 1], p)
    }

    fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    fn monic(&self) -> Self {
        match self.coefficients.last() {
            Some(&lead) => {
                let inv = inverse(lead, self.p);
                Self::new(self.coefficients.iter().map(|c| c * inv).collect(), self.p)
            }
            None => self.clone(),
        }
    }

    fn derivative(&self) -> Self {
        let p = self.p;
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, c)| (k as u64 % p) * c)
            .collect();
        Self::new(coefficients, p)
    }

    fn sub(&self, other: &Self) -> Self {
        let p = self.p;
        let len = self.coefficients.len().max(other.coefficients.len());
        let coefficients = (0..len)
            .map(|i| {
                let a = self.coefficients.get(i).copied().unwrap_or(0);
                let b = other.coefficients.get(i).copied().unwrap_or(0);
                a + p - b
            })
            .collect();
        Self::new(coefficients, p)
    }

    fn mul(&self, other: &Self) -> Self {
        let p = self.p;
        if self.is_zero() || other.is_zero() {
            return Self::new(Vec::new(), p);
        }
        let mut product = vec![0u64; self.coefficients.len() + other.coefficients.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coefficients.iter().enumerate() {
                product[i + j] = (product[i + j] + a * b) % p;
            }
        }
        Self::new(product, p)
    }

    /// Quotient and remainder; `divisor` must be non-zero
    fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        let p = self.p;
        let n = divisor.coefficients.len();
        let Some(&lead) = divisor.coefficients.last() else {
            return (Self::new(Vec::new(), p), self.clone());
        };
        if self.coefficients.len() < n {
            return (Self::new(Vec::new(), p), self.clone());
        }
        let inv = inverse(lead, p);
        let mut remainder = self.coefficients.clone();
        let mut quotient = vec![0u64; remainder.len() - n + 1];
        for shift in (0..quotient.len()).rev() {
            let c = remainder[shift + n - 1] * inv % p;
            quotient[shift] = c;
            for (i, &b) in divisor.coefficients.iter().enumerate() {
                remainder[shift + i] = (remainder[shift + i] + p - c * b % p) % p;
            }
        }
        remainder.truncate(n - 1);
        (Self::new(quotient, p), Self::new(remainder, p))
    }

    /// Monic greatest common divisor
    fn gcd(&self, other: &Self) -> Self {
        let (mut a, mut b) = (self.clone(), other.clone());
        while !b.is_zero() {
            let remainder = a.div_rem(&b).1;
            a = b;
            b = remainder;
        }
        a.monic()
    }

    /// `self^exp mod modulus`
    fn pow_mod(&self, mut exp: u64, modulus: &Self) -> Self {
        let mut result = Self::new(vec![1], self.p).div_rem(modulus).1;
        let mut base = self.div_rem(modulus).1;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base).div_rem(modulus).1;
            }
            base = base.mul(&base).div_rem(modulus).1;
            exp >>= 1;
        }
        result
    }
}

/// Degrees of the irreducible factors of `coefficients` modulo `p`, by
/// distinct-degree factorization. `None` when `p` divides the leading
/// coefficient or the reduction has a repeated factor.
fn degree_pattern(coefficients: &[i128], p: u64) -> Option<Vec<usize>> {
    let mut f = ModPoly::from_integers(coefficients, p);
    if f.degree() != Some(coefficients.len().checked_sub(1)?) {
        return None;
    }
    f = f.monic();
    let derivative = f.derivative();
    if derivative.is_zero() || f.gcd(&derivative).degree() != Some(0) {
        return None;
    }

    let x = ModPoly::x(p);
    let mut pattern = Vec::new();
    // x^(p^d) mod f
    let mut power = x.clone();
    let mut d = 1;
    while f.degree().unwrap_or(0) >= 2 * d {
        power = power.pow_mod(p, &f);
        let common = f.gcd(&power.sub(&x));
        let k = common.degree().unwrap_or(0);
        if k > 0 {
            pattern.extend(std::iter::repeat(d).take(k / d));
            f = f.div_rem(&common).0;
            power = power.div_rem(&f).1;
        }
        d += 1;
    }
    if let Some(k) = f.degree().filter(|&k| k > 0) {
        pattern.push(k);
    }
    Some(pattern)
}

/// Whether the polynomial stays square-free modulo one of the primes, which
/// proves it square-free over the integers
pub(super) fn square_free_mod_some_prime(coefficients: &[i128]) -> bool {
    PRIMES
        .iter()
        .take(MAX_PATTERNS)
        .any(|&p| degree_pattern(coefficients, p).is_some())
}

/// `allowed[d]` is false when no factor of degree `d` can exist over the
/// integers. Degrees a factor can have modulo every usable prime are the
/// subset sums of that prime's pattern.
pub(super) fn possible_factor_degrees(coefficients: &[i128]) -> Vec<bool> {
    let n = coefficients.len().saturating_sub(1);
    let mut allowed = vec![true; n + 1];
    let mut used = 0;
    for &p in &PRIMES {
        let Some(pattern) = degree_pattern(coefficients, p) else {
            continue;
        };
        let mut reachable = vec![false; n + 1];
        reachable[0] = true;
        for &d in &pattern {
            for s in (d..=n).rev() {
                if reachable[s - d] {
                    reachable[s] = true;
                }
            }
        }
        for (a, r) in allowed.iter_mut().zip(reachable) {
            *a = *a && r;
        }
        used += 1;
        let settled = allowed.iter().take(n).skip(1).all(|a| !a);
        if settled || used == MAX_PATTERNS {
            break;
        }
    }
    allowed
}

//! Numeric helpers shared by the cost models.
//!
//! Combinatorial quantities are computed exactly with `BigUint` and only then
//! moved into the log2 domain, so that intermediate values such as `C(n, w)`
//! for large codes never lose precision or overflow.

use crate::error::{EstimatorError, Result};
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

/// Number of leading bits kept when converting a big integer to `f64`.
const MANTISSA_WINDOW: u64 = 64;

/// Witnesses making Miller-Rabin deterministic for every `u64`.
const MILLER_RABIN_BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Exact binomial coefficient `C(n, k)`, zero when `k > n`.
pub fn binomial(n: u64, k: u64) -> BigUint {
    if k > n {
        return BigUint::zero();
    }
    let k = k.min(n - k);
    let mut acc = BigUint::one();
    for i in 0..k {
        // acc * (n - i) is always divisible by (i + 1) at this point
        acc *= n - i;
        acc /= i + 1;
    }
    acc
}

/// Base-2 logarithm of a big integer.
///
/// Returns `f64::NEG_INFINITY` for zero so callers can treat it like `log2(0.0)`.
pub fn log2_big(x: &BigUint) -> f64 {
    if x.is_zero() {
        return f64::NEG_INFINITY;
    }
    let bits = x.bits();
    if bits <= MANTISSA_WINDOW {
        return x.to_f64().map_or(f64::NEG_INFINITY, f64::log2);
    }
    let shift = bits - MANTISSA_WINDOW;
    let top = (x >> shift).to_f64().map_or(f64::NEG_INFINITY, f64::log2);
    top + shift as f64
}

/// `2^exponent`, failing instead of saturating to infinity.
pub fn exp2_checked(exponent: f64, what: &str) -> Result<f64> {
    if exponent.is_nan() {
        return Err(EstimatorError::ArithmeticDomain(format!(
            "{} is not a number",
            what
        )));
    }
    let value = exponent.exp2();
    if value.is_infinite() {
        return Err(EstimatorError::ArithmeticOverflow(format!(
            "{} ≈ 2^{:.1} exceeds the f64 range",
            what, exponent
        )));
    }
    Ok(value)
}

/// Reject non-finite intermediate results of a direct `f64` formula.
pub fn finite_or_overflow(value: f64, what: &str) -> Result<f64> {
    if value.is_nan() {
        return Err(EstimatorError::ArithmeticDomain(format!(
            "{} is not a number",
            what
        )));
    }
    if value.is_infinite() {
        return Err(EstimatorError::ArithmeticOverflow(format!(
            "{} exceeds the f64 range",
            what
        )));
    }
    Ok(value)
}

/// Deterministic primality test for the full `u64` range.
///
/// Trial division by the witness primes handles small inputs, Miller-Rabin
/// with the fixed witness set handles the rest.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in MILLER_RABIN_BASES.iter() {
        if n % p == 0 {
            return n == p;
        }
    }

    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for &a in MILLER_RABIN_BASES.iter() {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut acc = 1u64;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mul_mod(acc, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    acc
}

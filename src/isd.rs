//! Information-set decoding.
//!
//! Lee–Brickell is the ISD variant used as a subroutine by the ISD-based code
//! equivalence attacks (Leon, Beullens): they need the cost of finding a few
//! codewords of a fixed low weight `w` in a random `[n, k]_q` code.
//!
//! All combinatorial quantities are exact big integers; the final cost is
//! assembled in the log2 domain so that the tiny expected codeword counts of
//! cryptographic parameter sets (often far below `2^-100`) do not underflow.

use crate::error::{EstimatorError, Result};
use crate::pce::PceParameters;
use crate::util::{binomial, exp2_checked, finite_or_overflow, log2_big};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::Serialize;
use std::f64::consts::LN_2;
use std::fmt;

/// Parameters of one ISD instance: find weight-`w` words in an `[n, k]_q` code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct IsdParameters {
    q: u64,
    n: u64,
    k: u64,
    w: u64,
}

impl IsdParameters {
    pub const FIELDS: [&'static str; 4] = ["q", "n", "k", "w"];

    pub fn new(q: u64, n: u64, k: u64, w: u64) -> Self {
        Self { q, n, k, w }
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn k(&self) -> u64 {
        self.k
    }

    pub fn w(&self) -> u64 {
        self.w
    }

    /// Return a copy with the named fields replaced.
    pub fn updated<'a, I>(&self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let mut next = *self;
        for (field, value) in overrides {
            match field {
                "q" => next.q = value,
                "n" => next.n = value,
                "k" => next.k = value,
                "w" => next.w = value,
                other => {
                    return Err(EstimatorError::InvalidParameter(format!(
                        "ISDParameters has no field `{}` (expected one of {:?})",
                        other,
                        Self::FIELDS
                    )))
                }
            }
        }
        Ok(next)
    }
}

impl From<&PceParameters> for IsdParameters {
    fn from(p: &PceParameters) -> Self {
        Self::new(p.q(), p.n(), p.k(), p.w())
    }
}

impl fmt::Display for IsdParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ISDParameters(q={}, n={}, k={}, w={})",
            self.q, self.n, self.k, self.w
        )
    }
}

/// `log2` of the expected number of weight-`w` codewords up to scalar
/// multiplication, `N_w ≈ C(n, w) · (q−1)^(w−2) · q^(k−n+1)`.
pub fn log2_expected_codewords(params: &IsdParameters) -> f64 {
    let q = params.q as f64;
    log2_big(&binomial(params.n, params.w))
        + (params.w as f64 - 2.0) * (q - 1.0).log2()
        + (params.k as f64 + 1.0 - params.n as f64) * q.log2()
}

/// Exact test of `L == (q−1) · N_w` for the estimated `N_w`.
///
/// With `e = k−n+1`, `(q−1)·N_w = C(n,w)·(q−1)^(w−1)·q^e`, so the test is
/// carried out on `L · q^max(−e, 0) == C(n,w)·(q−1)^(w−1)·q^max(e, 0)`.
fn collects_every_codeword(params: &IsdParameters, c_nw: &BigUint, l: f64) -> bool {
    if l.fract() != 0.0 || l > u64::MAX as f64 {
        return false;
    }
    let (l, w_exp) = match (l.to_u64(), u32::try_from(params.w - 1)) {
        (Some(l), Ok(w_exp)) => (l, w_exp),
        _ => return false,
    };
    let e = params.k as i128 + 1 - params.n as i128;
    let (num_exp, den_exp) = match (u32::try_from(e.max(0)), u32::try_from((-e).max(0))) {
        (Ok(a), Ok(b)) => (a, b),
        _ => return false,
    };
    let q = BigUint::from(params.q);
    let numerator = c_nw * BigUint::from(params.q - 1).pow(w_exp) * q.pow(num_exp);
    let denominator = q.pow(den_exp);
    BigUint::from(l) * denominator == numerator
}

/// Lee–Brickell cost of collecting `l` of the weight-`w` codewords.
///
/// `n_w` is the number of weight-`w` codewords up to scalar multiplication;
/// when `None` it is estimated by [`log2_expected_codewords`]. With
/// `N = (q−1)·N_w` and per-iteration cost `C_inf = q·C(n,w) / C(n−k, w−2)` the
/// cost is `(l/N)·C_inf`, or `C_inf·ln(N)` when every codeword is collected
/// (`l == N`).
///
/// # Errors
/// * `InvalidParameter` for `w < 2`, `k > n`, `q < 2` or a non-positive `l`
/// * `ArithmeticDomain` when `C(n−k, w−2)` or `N` vanishes
/// * `ArithmeticOverflow` when the cost leaves the `f64` range
pub fn lee_brickell(params: &IsdParameters, n_w: Option<f64>, l: f64) -> Result<f64> {
    if params.w < 2 {
        return Err(EstimatorError::InvalidParameter(format!(
            "Lee-Brickell needs target weight w >= 2, got {}",
            params.w
        )));
    }
    if params.k > params.n {
        return Err(EstimatorError::InvalidParameter(format!(
            "code dimension k={} exceeds length n={}",
            params.k, params.n
        )));
    }
    if params.q < 2 {
        return Err(EstimatorError::InvalidParameter(format!(
            "field size q={} must be at least 2",
            params.q
        )));
    }
    if !(l > 0.0 && l.is_finite()) {
        return Err(EstimatorError::InvalidParameter(format!(
            "number of codewords to find must be positive, got {}",
            l
        )));
    }

    let c_nw = binomial(params.n, params.w);
    let c_info = binomial(params.n - params.k, params.w - 2);
    if c_info.is_zero() {
        return Err(EstimatorError::ArithmeticDomain(format!(
            "C({}, {}) vanishes for {}",
            params.n - params.k,
            params.w - 2,
            params
        )));
    }
    if c_nw.is_zero() {
        return Err(EstimatorError::ArithmeticDomain(format!(
            "no codewords of weight {} in length {}",
            params.w, params.n
        )));
    }

    let q = params.q as f64;
    let log2_c_inf = q.log2() + log2_big(&c_nw) - log2_big(&c_info);

    let (log2_total, exhaustive) = match n_w {
        Some(n_w) => {
            let total = (q - 1.0) * n_w;
            if !(total > 0.0) {
                return Err(EstimatorError::ArithmeticDomain(format!(
                    "expected codeword count must be positive, got N_w={}",
                    n_w
                )));
            }
            (total.log2(), l == total)
        }
        None => {
            let log2_total = (q - 1.0).log2() + log2_expected_codewords(params);
            (log2_total, collects_every_codeword(params, &c_nw, l))
        }
    };

    if exhaustive {
        let c_inf = exp2_checked(log2_c_inf, "Lee-Brickell iteration cost")?;
        finite_or_overflow(c_inf * log2_total * LN_2, "Lee-Brickell cost")
    } else {
        exp2_checked(l.log2() - log2_total + log2_c_inf, "Lee-Brickell cost")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn comb(n: u64, k: u64) -> f64 {
        binomial(n, k).to_f64().unwrap()
    }

    fn direct(q: u64, n: u64, k: u64, w: u64, l: f64) -> (f64, f64) {
        let qf = q as f64;
        let n_w = comb(n, w) * (qf - 1.0).powi(w as i32 - 2) * qf.powi(k as i32 - n as i32 + 1);
        let total = (qf - 1.0) * n_w;
        let c_inf = qf * comb(n, w) / comb(n - k, w - 2);
        (n_w, (l / total) * c_inf)
    }

    #[test]
    fn test_lee_brickell_pce_scenario() {
        // [128, 64]_7 code, weight-5 words
        let p = IsdParameters::new(7, 128, 64, 5);
        let cost = lee_brickell(&p, None, 1.0).unwrap();
        assert!((cost.log2() - 153.984_351_275_636_4).abs() < 1e-6);
    }

    #[test]
    fn test_lee_brickell_exhaustive_collection() {
        // k = n - 1 makes N an integer: N = C(10, 2) = 45 over GF(2)
        let p = IsdParameters::new(2, 10, 9, 2);
        let cost = lee_brickell(&p, None, 45.0).unwrap();
        let expected = 90.0 * 45f64.ln();
        assert!((cost - expected).abs() < 1e-9 * expected);

        let given = lee_brickell(&p, Some(45.0), 45.0).unwrap();
        assert!((given - expected).abs() < 1e-9 * expected);

        // one fewer codeword takes the ordinary branch
        let partial = lee_brickell(&p, None, 44.0).unwrap();
        assert!((partial - 44.0 / 45.0 * 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_lee_brickell_rejects_invalid_inputs() {
        let p = IsdParameters::new(7, 128, 64, 1);
        assert!(matches!(
            lee_brickell(&p, None, 1.0),
            Err(EstimatorError::InvalidParameter(_))
        ));

        let p = IsdParameters::new(7, 64, 128, 5);
        assert!(matches!(
            lee_brickell(&p, None, 1.0),
            Err(EstimatorError::InvalidParameter(_))
        ));

        let p = IsdParameters::new(7, 128, 64, 5);
        assert!(matches!(
            lee_brickell(&p, None, 0.0),
            Err(EstimatorError::InvalidParameter(_))
        ));

        // w - 2 > n - k
        let p = IsdParameters::new(7, 10, 8, 6);
        assert!(matches!(
            lee_brickell(&p, None, 1.0),
            Err(EstimatorError::ArithmeticDomain(_))
        ));
    }

    #[test]
    fn test_lee_brickell_overflow_is_reported() {
        let p = IsdParameters::new(4093, 4000, 100, 40);
        assert!(matches!(
            lee_brickell(&p, None, 1.0),
            Err(EstimatorError::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn test_expected_codewords() {
        let p = IsdParameters::new(3, 30, 20, 6);
        let (n_w, _) = direct(3, 30, 20, 6, 1.0);
        assert!((log2_expected_codewords(&p) - n_w.log2()).abs() < 1e-9);
    }

    #[test]
    fn test_updated_and_from_pce() {
        let pce = PceParameters::new(7, 128, 64, 50, 5);
        let p = IsdParameters::from(&pce);
        assert_eq!(p, IsdParameters::new(7, 128, 64, 5));
        assert_eq!(p.updated([("w", 6)]).unwrap().w(), 6);
        assert!(p.updated([("h", 6)]).is_err());
    }

    proptest! {
        #[test]
        fn prop_lee_brickell_matches_formula(
            q in 2u64..8,
            n in 8u64..40,
            k_frac in 0.2f64..0.8,
            w_off in 0u64..5,
            l in 1u32..1000
        ) {
            let k = ((n as f64) * k_frac) as u64;
            let w = 2 + w_off.min(n - k);
            let l = l as f64;
            let (n_w, expected) = direct(q, n, k, w, l);
            prop_assume!((l - (q as f64 - 1.0) * n_w).abs() > 1e-6);

            let p = IsdParameters::new(q, n, k, w);
            let estimated = lee_brickell(&p, None, l).unwrap();
            let given = lee_brickell(&p, Some(n_w), l).unwrap();
            prop_assert!((estimated - expected).abs() <= 1e-9 * expected);
            prop_assert!((given - expected).abs() <= 1e-9 * expected);
        }
    }
}

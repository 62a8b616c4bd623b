use crate::error::{EstimatorError, Result};
use serde::Serialize;
use std::fmt;

/// Parameters of a permutation code equivalence instance.
///
/// Equality and hashing cover every field: all five enter at least one cost
/// model (`h` drives SSA and BOS), so two instances compare equal exactly when
/// every model assigns them the same cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PceParameters {
    /// Code length.
    n: u64,
    /// Code dimension.
    k: u64,
    /// Field size.
    q: u64,
    /// Hull dimension.
    h: u64,
    /// Target weight of the low-weight codewords used by ISD-based attacks.
    w: u64,
}

impl PceParameters {
    pub const FIELDS: [&'static str; 5] = ["n", "k", "q", "h", "w"];

    pub fn new(q: u64, n: u64, k: u64, h: u64, w: u64) -> Self {
        Self { n, k, q, h, w }
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn k(&self) -> u64 {
        self.k
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    pub fn h(&self) -> u64 {
        self.h
    }

    pub fn w(&self) -> u64 {
        self.w
    }

    /// Return a copy with the named fields replaced.
    ///
    /// ```
    /// use pqce_estimator::PceParameters;
    ///
    /// let p = PceParameters::new(7, 128, 64, 50, 5);
    /// let r = p.updated([("h", 5)]).unwrap();
    /// assert_eq!(r.to_string(), "PCEParameters(n=128, k=64, q=7, h=5, w=5)");
    /// assert_eq!(p.h(), 50);
    /// ```
    pub fn updated<'a, I>(&self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let mut next = *self;
        for (field, value) in overrides {
            match field {
                "n" => next.n = value,
                "k" => next.k = value,
                "q" => next.q = value,
                "h" => next.h = value,
                "w" => next.w = value,
                other => {
                    return Err(EstimatorError::InvalidParameter(format!(
                        "PCEParameters has no field `{}` (expected one of {:?})",
                        other,
                        Self::FIELDS
                    )))
                }
            }
        }
        Ok(next)
    }
}

impl fmt::Display for PceParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PCEParameters(n={}, k={}, q={}, h={}, w={})",
            self.n, self.k, self.q, self.h, self.w
        )
    }
}

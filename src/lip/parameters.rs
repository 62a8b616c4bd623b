use crate::error::{EstimatorError, Result};
use serde::Serialize;
use std::fmt;

/// Parameters of a lattice isomorphism instance.
///
/// Equality and hashing cover both fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct LipParameters {
    /// Lattice rank.
    n: u64,
    /// Modulus.
    q: u64,
}

impl LipParameters {
    pub const FIELDS: [&'static str; 2] = ["n", "q"];

    pub fn new(n: u64, q: u64) -> Self {
        Self { n, q }
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    /// Dimension of the doubled lattice both LIP attacks reduce.
    pub fn reduction_dimension(&self) -> u64 {
        self.n.saturating_mul(2)
    }

    /// Return a copy with the named fields replaced.
    pub fn updated<'a, I>(&self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let mut next = *self;
        for (field, value) in overrides {
            match field {
                "n" => next.n = value,
                "q" => next.q = value,
                other => {
                    return Err(EstimatorError::InvalidParameter(format!(
                        "LIPParameters has no field `{}` (expected one of {:?})",
                        other,
                        Self::FIELDS
                    )))
                }
            }
        }
        Ok(next)
    }
}

impl fmt::Display for LipParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIPParameters(n={}, q={})", self.n, self.q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updated() {
        let p = LipParameters::new(200, 127);
        let r = p.updated([("q", 131)]).unwrap();
        assert_eq!(r, LipParameters::new(200, 131));
        assert_eq!(p.q(), 127);
        assert!(matches!(
            p.updated([("k", 1)]),
            Err(EstimatorError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_reduction_dimension() {
        assert_eq!(LipParameters::new(200, 127).reduction_dimension(), 400);
        assert_eq!(LipParameters::new(0, 127).reduction_dimension(), 0);
    }
}

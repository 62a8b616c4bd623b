//! Beullens' attack: recover the permutation from a single low-weight
//! codeword of each code, found with Lee–Brickell.

use super::PceParameters;
use crate::batch::Algorithm;
use crate::cost::{Cost, Metric};
use crate::error::Result;
use crate::isd::{lee_brickell, IsdParameters};

pub const TAG: &str = "beullens";

#[derive(Clone, Copy, Debug, Default)]
pub struct Beullens;

impl Algorithm<PceParameters> for Beullens {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn estimate(&self, params: &PceParameters) -> Result<Cost> {
        let isd = IsdParameters::from(params);
        let rop = lee_brickell(&isd, None, 1.0)?;
        Cost::with_rop(Metric::Finite(rop))
            .with_tag(TAG)
            .with_problem(*params)
            .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimatorError;

    #[test]
    fn test_beullens_reference_instance() {
        let p = PceParameters::new(7, 128, 64, 50, 5);
        let cost = Beullens.estimate(&p).unwrap();
        let rop = cost.rop().and_then(|m| m.value()).unwrap();
        let expected = 2.258_960_291_302_783_6e46;
        assert!((rop - expected).abs() <= 1e-9 * expected, "rop = {}", rop);
        assert_eq!(cost.tag(), Some("beullens"));
    }

    #[test]
    fn test_beullens_ignores_hull() {
        let p = PceParameters::new(7, 128, 64, 50, 5);
        let a = Beullens.estimate(&p).unwrap();
        let b = Beullens.estimate(&p.updated([("h", 0)]).unwrap()).unwrap();
        assert_eq!(a.rop(), b.rop());
    }

    #[test]
    fn test_beullens_needs_weight_two() {
        let p = PceParameters::new(7, 128, 64, 0, 1);
        assert!(matches!(
            Beullens.estimate(&p),
            Err(EstimatorError::InvalidParameter(_))
        ));
    }
}

//! Leon's algorithm: collect the weight-`w` codewords of both codes and match
//! them. Finding the set costs Lee–Brickell with `L = 1` scaled by `ln(N_w)`;
//! with fewer than two expected codewords there is nothing to match.

use super::PceParameters;
use crate::batch::Algorithm;
use crate::cost::{Cost, Metric};
use crate::error::Result;
use crate::isd::{lee_brickell, log2_expected_codewords, IsdParameters};
use crate::util::finite_or_overflow;
use std::f64::consts::LN_2;

pub const TAG: &str = "leon";

#[derive(Clone, Copy, Debug, Default)]
pub struct Leon;

impl Algorithm<PceParameters> for Leon {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn estimate(&self, params: &PceParameters) -> Result<Cost> {
        let isd = IsdParameters::from(params);
        let log2_n_w = log2_expected_codewords(&isd);

        // N_w < 2
        let rop = if !(log2_n_w >= 1.0) {
            Metric::Unbounded
        } else {
            let single = lee_brickell(&isd, None, 1.0)?;
            Metric::Finite(finite_or_overflow(
                single * log2_n_w * LN_2,
                &format!("Leon cost for {}", params),
            )?)
        };

        Cost::with_rop(rop)
            .with_tag(TAG)
            .with_problem(*params)
            .validate()
    }
}

//! Haviv–Regev attack: lattice reduction of the doubled lattice, dimension
//! `d = 2n`, with block size `d/2 + n`. There is no search term.

use super::LipParameters;
use crate::batch::Algorithm;
use crate::conf::{RED_COST_MODEL, RED_SHAPE_MODEL};
use crate::cost::{Cost, Metric};
use crate::error::Result;
use crate::reduction::{self, CostModel, ShapeModel};
use crate::util::is_prime;

pub const TAG: &str = "havreg";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HavReg {
    red_cost_model: CostModel,
    red_shape_model: ShapeModel,
}

impl HavReg {
    pub fn new(red_cost_model: CostModel, red_shape_model: ShapeModel) -> Self {
        Self {
            red_cost_model,
            red_shape_model,
        }
    }
}

impl Default for HavReg {
    fn default() -> Self {
        Self::new(RED_COST_MODEL, RED_SHAPE_MODEL)
    }
}

impl Algorithm<LipParameters> for HavReg {
    fn tag(&self) -> &'static str {
        TAG
    }

    /// # Errors
    /// * `MalformedCost` under a shape model with no reduction cost, since the
    ///   record then has no `rop`
    fn estimate(&self, params: &LipParameters) -> Result<Cost> {
        let d = params.reduction_dimension();
        if !is_prime(params.q()) || d < 2 {
            return Cost::with_rop(Metric::Unbounded)
                .with_tag(TAG)
                .with_problem(*params)
                .validate();
        }

        let cost = if self.red_shape_model.is_supported() {
            let beta = d as f64 / 2.0 + params.n() as f64;
            reduction::cost(self.red_cost_model, beta, d)?
        } else {
            Cost::new()
        };
        cost.with_tag(TAG).with_problem(*params).validate()
    }
}

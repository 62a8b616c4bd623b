//! Hull attack on lattice isomorphism.
//!
//! Reduces the doubled lattice of dimension `d = 2n` with block size
//! `d/2 + ln(n)`, then solves the code equivalence instance left over with
//! the support-splitting algorithm. The SSA cost is merged into the reduction
//! cost and kept separately as `non_red`.

use super::LipParameters;
use crate::batch::Algorithm;
use crate::conf::{HULL_TARGET_WEIGHT, RED_COST_MODEL, RED_SHAPE_MODEL};
use crate::cost::{Cost, Metric};
use crate::error::Result;
use crate::pce::{PceParameters, Ssa};
use crate::reduction::{self, CostModel, ShapeModel};
use crate::util::is_prime;

pub const TAG: &str = "hull";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HullAttack {
    red_cost_model: CostModel,
    red_shape_model: ShapeModel,
}

impl HullAttack {
    pub fn new(red_cost_model: CostModel, red_shape_model: ShapeModel) -> Self {
        Self {
            red_cost_model,
            red_shape_model,
        }
    }

    /// Code equivalence instance solved after reduction.
    ///
    /// The code dimension equals the length and the hull is trivial.
    pub fn embedded_instance(params: &LipParameters) -> PceParameters {
        PceParameters::new(params.q(), params.n(), params.n(), 0, HULL_TARGET_WEIGHT)
    }
}

impl Default for HullAttack {
    fn default() -> Self {
        Self::new(RED_COST_MODEL, RED_SHAPE_MODEL)
    }
}

impl Algorithm<LipParameters> for HullAttack {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn estimate(&self, params: &LipParameters) -> Result<Cost> {
        let d = params.reduction_dimension();
        if !is_prime(params.q()) || d < 2 {
            return Cost::with_rop(Metric::Unbounded)
                .with_tag(TAG)
                .with_problem(*params)
                .validate();
        }

        let red = if self.red_shape_model.is_supported() {
            let beta = d as f64 / 2.0 + (params.n() as f64).ln();
            reduction::cost(self.red_cost_model, beta, d)?
        } else {
            Cost::new()
        };
        let ssa = Ssa.estimate(&Self::embedded_instance(params))?;

        let mut cost = red.merge(&ssa);
        if let Some(non_red) = ssa.rop() {
            cost.set("non_red", non_red);
        }
        cost.with_tag(TAG).with_problem(*params).validate()
    }
}

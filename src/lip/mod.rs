//! Lattice isomorphism.
//!
//! Both attacks reduce a doubled lattice of dimension `2n`; the reduction
//! cost comes from [`crate::reduction`] under the configured cost and shape
//! models.

mod havreg;
mod hull;
mod parameters;

pub use havreg::HavReg;
pub use hull::HullAttack;
pub use parameters::LipParameters;

use crate::batch::{estimate_instance, Algorithm, Registry};
use crate::conf::EstimatorConfig;
use crate::cost::Cost;
use crate::error::Result;
use crate::reduction::{CostModel, ShapeModel};
use std::collections::BTreeMap;
use std::sync::Arc;

/// LIP estimator facade.
///
/// ```
/// use pqce_estimator::lip::{Estimate, LipParameters};
///
/// let costs = Estimate::default()
///     .full(&LipParameters::new(200, 127), 1, true)
///     .unwrap();
/// assert_eq!(costs["hull"].rop().unwrap().to_string(), "≈2^86.7");
/// assert_eq!(costs["havreg"].rop().unwrap().to_string(), "≈2^132.9");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Estimate {
    red_cost_model: CostModel,
    red_shape_model: ShapeModel,
}

impl Estimate {
    pub fn new(red_cost_model: CostModel, red_shape_model: ShapeModel) -> Self {
        Self {
            red_cost_model,
            red_shape_model,
        }
    }

    fn registry(&self, rough: bool) -> Registry<LipParameters> {
        let hull = HullAttack::new(self.red_cost_model, self.red_shape_model);
        let registry =
            Registry::new().register("hull", Arc::new(hull) as Arc<dyn Algorithm<LipParameters>>);
        if rough {
            return registry;
        }
        let havreg = HavReg::new(self.red_cost_model, self.red_shape_model);
        registry.register("havreg", Arc::new(havreg))
    }

    /// Hull attack only.
    pub fn rough(
        &self,
        params: &LipParameters,
        jobs: usize,
        catch_exceptions: bool,
    ) -> Result<BTreeMap<String, Cost>> {
        estimate_instance(&self.registry(true), params, jobs, catch_exceptions)
    }

    /// Hull attack and Haviv–Regev.
    pub fn full(
        &self,
        params: &LipParameters,
        jobs: usize,
        catch_exceptions: bool,
    ) -> Result<BTreeMap<String, Cost>> {
        estimate_instance(&self.registry(false), params, jobs, catch_exceptions)
    }
}

impl From<&EstimatorConfig> for Estimate {
    fn from(config: &EstimatorConfig) -> Self {
        Self::new(config.red_cost_model, config.red_shape_model)
    }
}

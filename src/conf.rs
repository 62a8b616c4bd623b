//! Default configuration for the estimators.
//!
//! These are defaults only: worker count, fault isolation and the reduction
//! models are chosen per call, nothing here is process-wide state.

use crate::reduction::{CostModel, ShapeModel};

/// Default lattice-reduction cost model.
pub const RED_COST_MODEL: CostModel = CostModel::Matzov;

/// Default lattice-reduction shape model.
pub const RED_SHAPE_MODEL: ShapeModel = ShapeModel::Gsa;

/// Default number of workers; one means sequential in-process evaluation.
pub const DEFAULT_JOBS: usize = 1;

/// Target weight of the code equivalence instance embedded in the hull attack.
pub const HULL_TARGET_WEIGHT: u64 = 5;

/// Per-call estimator settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Size of the worker pool used by the batch dispatcher.
    pub jobs: usize,
    /// Record faulting algorithms as failures instead of aborting the batch.
    pub catch_exceptions: bool,
    /// Cost model for lattice reduction.
    pub red_cost_model: CostModel,
    /// Shape model for lattice reduction.
    pub red_shape_model: ShapeModel,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            jobs: DEFAULT_JOBS,
            catch_exceptions: true,
            red_cost_model: RED_COST_MODEL,
            red_shape_model: RED_SHAPE_MODEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EstimatorConfig::default();
        assert_eq!(config.jobs, 1);
        assert!(config.catch_exceptions);
        assert_eq!(config.red_cost_model, CostModel::Matzov);
        assert_eq!(config.red_shape_model, ShapeModel::Gsa);
    }
}

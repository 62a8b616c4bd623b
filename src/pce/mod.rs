//! Permutation code equivalence.
//!
//! Cost models for recovering the permutation between two equivalent
//! `[n, k]_q` codes, and the [`Estimate`] facade that runs them.

mod beullens;
mod bos;
mod leon;
mod parameters;
mod ssa;

pub use beullens::Beullens;
pub use bos::Bos;
pub use leon::Leon;
pub use parameters::PceParameters;
pub use ssa::Ssa;

use crate::batch::{estimate_instance, Algorithm, Registry};
use crate::cost::Cost;
use crate::error::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

/// PCE estimator facade.
///
/// Stateless; the algorithm registry is rebuilt on every call.
///
/// ```
/// use pqce_estimator::pce::{Estimate, PceParameters};
///
/// let params = PceParameters::new(7, 128, 64, 50, 5);
/// let costs = Estimate.rough(&params, 1, true).unwrap();
/// assert_eq!(costs.keys().collect::<Vec<_>>(), vec!["beullens", "ssa"]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Estimate;

impl Estimate {
    fn registry(rough: bool) -> Registry<PceParameters> {
        let registry = Registry::new()
            .register("ssa", Arc::new(Ssa) as Arc<dyn Algorithm<PceParameters>>)
            .register("beullens", Arc::new(Beullens));
        if rough {
            return registry;
        }
        registry
            .register("leon", Arc::new(Leon))
            .register("bos", Arc::new(Bos))
    }

    /// Cheap subset for parameter scans: SSA and Beullens.
    pub fn rough(
        &self,
        params: &PceParameters,
        jobs: usize,
        catch_exceptions: bool,
    ) -> Result<BTreeMap<String, Cost>> {
        estimate_instance(&Self::registry(true), params, jobs, catch_exceptions)
    }

    /// Every PCE cost model: SSA, Leon, Beullens and BOS.
    pub fn full(
        &self,
        params: &PceParameters,
        jobs: usize,
        catch_exceptions: bool,
    ) -> Result<BTreeMap<String, Cost>> {
        estimate_instance(&Self::registry(false), params, jobs, catch_exceptions)
    }
}

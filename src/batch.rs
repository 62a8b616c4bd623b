//! Algorithm registry and batch dispatcher.
//!
//! The dispatcher evaluates every (parameter instance, algorithm) pair of a
//! batch, sequentially for `jobs == 1` or on a dedicated Rayon pool otherwise,
//! and returns a two-level map `instance → tag → outcome`.
//!
//! Fault policy:
//! - with `catch_exceptions`, an algorithm returning an error or panicking is
//!   recorded as a failed cell and the rest of the batch continues;
//! - without it, the first fault aborts the batch and reaches the caller.
//!
//! Infeasible attacks are successful evaluations (`rop = ∞`), not faults.

use crate::cost::Cost;
use crate::error::{EstimatorError, Result};
use crate::report;
use rayon::prelude::*;
use std::any::Any;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// A cost model for parameter type `P`.
pub trait Algorithm<P>: Send + Sync {
    /// Tag identifying the model; results are keyed by it.
    fn tag(&self) -> &'static str;

    /// Evaluate the model on one instance.
    fn estimate(&self, params: &P) -> Result<Cost>;
}

/// Result of one cell: a cost, or the fault the algorithm raised.
pub type Outcome = std::result::Result<Cost, EstimatorError>;

/// Dispatcher output: instance → algorithm tag → outcome.
pub type BatchResult<P> = HashMap<P, BTreeMap<&'static str, Outcome>>;

/// Named references to cost models, assembled per estimator call.
pub struct Registry<P> {
    entries: Vec<(String, Arc<dyn Algorithm<P>>)>,
}

impl<P> Registry<P> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add `algorithm` under `name`.
    pub fn register(mut self, name: impl Into<String>, algorithm: Arc<dyn Algorithm<P>>) -> Self {
        self.entries.push((name.into(), algorithm));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn algorithms(&self) -> Vec<Arc<dyn Algorithm<P>>> {
        self.entries.iter().map(|(_, alg)| Arc::clone(alg)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P> Default for Registry<P> {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn evaluate<P>(algorithm: &dyn Algorithm<P>, params: &P, catch_exceptions: bool) -> Outcome {
    if !catch_exceptions {
        return algorithm.estimate(params);
    }
    match panic::catch_unwind(AssertUnwindSafe(|| algorithm.estimate(params))) {
        Ok(outcome) => outcome,
        Err(payload) => Err(EstimatorError::Panicked {
            tag: algorithm.tag().to_string(),
            message: panic_message(&*payload),
        }),
    }
}

fn same_model<P>(a: &Arc<dyn Algorithm<P>>, b: &Arc<dyn Algorithm<P>>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// Keep the first algorithm registered under each tag.
///
/// Another reference to the same model collapses silently; a different model
/// claiming a taken tag is dropped with a warning.
fn unique_by_tag<P, A>(algorithms: A) -> Vec<Arc<dyn Algorithm<P>>>
where
    P: 'static,
    A: IntoIterator<Item = Arc<dyn Algorithm<P>>>,
{
    let mut kept: Vec<Arc<dyn Algorithm<P>>> = Vec::new();
    for algorithm in algorithms {
        match kept.iter().find(|first| first.tag() == algorithm.tag()) {
            None => kept.push(algorithm),
            Some(first) if same_model(first, &algorithm) => {}
            Some(_) => tracing::warn!(
                tag = algorithm.tag(),
                "tag already taken by another algorithm, dropping the later one"
            ),
        }
    }
    kept
}

/// Evaluate every algorithm on every parameter instance.
///
/// Duplicate instances and algorithms sharing a tag are evaluated once. An
/// empty instance or algorithm set yields an empty result.
///
/// # Arguments
/// * `params` - Parameter instances
/// * `algorithms` - Cost models to run on each instance
/// * `jobs` - Worker pool size, `1` for sequential evaluation
/// * `catch_exceptions` - Record faults per cell instead of aborting
///
/// # Returns
/// * `Result<BatchResult<P>>` - Outcomes keyed by instance and tag
pub fn batch_estimate<P, I, A>(
    params: I,
    algorithms: A,
    jobs: usize,
    catch_exceptions: bool,
) -> Result<BatchResult<P>>
where
    P: Clone + Eq + Hash + Display + Send + Sync + 'static,
    I: IntoIterator<Item = P>,
    A: IntoIterator<Item = Arc<dyn Algorithm<P>>>,
{
    if jobs == 0 {
        return Err(EstimatorError::InvalidParameter(
            "worker count must be at least 1".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let instances: Vec<P> = params
        .into_iter()
        .filter(|p| seen.insert(p.clone()))
        .collect();
    let algorithms = unique_by_tag(algorithms);

    if instances.is_empty() || algorithms.is_empty() {
        return Ok(HashMap::new());
    }

    let tasks: Vec<(usize, usize)> = (0..instances.len())
        .flat_map(|i| (0..algorithms.len()).map(move |j| (i, j)))
        .collect();

    let run = |&(i, j): &(usize, usize)| -> Result<(usize, usize, Outcome)> {
        let algorithm = algorithms[j].as_ref();
        let problem = &instances[i];
        match evaluate(algorithm, problem, catch_exceptions) {
            Err(err) if !catch_exceptions => Err(err),
            Err(err) => {
                tracing::warn!(tag = algorithm.tag(), %problem, error = %err, "algorithm failed");
                Ok((i, j, Err(err)))
            }
            Ok(cost) => {
                tracing::debug!(tag = algorithm.tag(), %problem, %cost, "algorithm finished");
                Ok((i, j, Ok(cost)))
            }
        }
    };

    let cells = if jobs == 1 {
        tasks.iter().map(run).collect::<Result<Vec<_>>>()?
    } else {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
        pool.install(|| tasks.par_iter().map(run).collect::<Result<Vec<_>>>())?
    };

    let mut result: BatchResult<P> = HashMap::with_capacity(instances.len());
    for (i, j, outcome) in cells {
        result
            .entry(instances[i].clone())
            .or_default()
            .insert(algorithms[j].tag(), outcome);
    }
    Ok(result)
}

/// Run a registry on one instance and re-key the successful costs by tag.
///
/// Feasible costs are reported; failed cells are dropped from the returned
/// map (inspect [`batch_estimate`] directly to see them).
pub fn estimate_instance<P>(
    registry: &Registry<P>,
    params: &P,
    jobs: usize,
    catch_exceptions: bool,
) -> Result<BTreeMap<String, Cost>>
where
    P: Clone + Eq + Hash + Display + Send + Sync + 'static,
{
    let mut batch = batch_estimate([params.clone()], registry.algorithms(), jobs, catch_exceptions)?;
    let results: BTreeMap<String, Cost> = batch
        .remove(params)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(tag, outcome)| outcome.ok().map(|cost| (tag.to_string(), cost)))
        .collect();
    report::emit(&results);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::Metric;

    struct Fixed {
        tag: &'static str,
        rop: f64,
    }

    impl Algorithm<u64> for Fixed {
        fn tag(&self) -> &'static str {
            self.tag
        }

        fn estimate(&self, params: &u64) -> Result<Cost> {
            Cost::with_rop(Metric::Finite(self.rop * *params as f64))
                .with_tag(self.tag)
                .validate()
        }
    }

    struct Infeasible;

    impl Algorithm<u64> for Infeasible {
        fn tag(&self) -> &'static str {
            "infeasible"
        }

        fn estimate(&self, _params: &u64) -> Result<Cost> {
            Cost::with_rop(Metric::Unbounded).with_tag("infeasible").validate()
        }
    }

    struct Failing;

    impl Algorithm<u64> for Failing {
        fn tag(&self) -> &'static str {
            "failing"
        }

        fn estimate(&self, params: &u64) -> Result<Cost> {
            Err(EstimatorError::ArithmeticDomain(format!("no model for {}", params)))
        }
    }

    struct Panicking;

    impl Algorithm<u64> for Panicking {
        fn tag(&self) -> &'static str {
            "panicking"
        }

        fn estimate(&self, _params: &u64) -> Result<Cost> {
            panic!("model exploded")
        }
    }

    fn fixed(tag: &'static str, rop: f64) -> Arc<dyn Algorithm<u64>> {
        Arc::new(Fixed { tag, rop })
    }

    #[test]
    fn test_every_pair_evaluated_once() {
        let algs = vec![fixed("a", 1.0), fixed("b", 2.0)];
        let result = batch_estimate(vec![1u64, 2, 3], algs, 1, false).unwrap();
        assert_eq!(result.len(), 3);
        for (p, row) in &result {
            assert_eq!(row.len(), 2);
            let b = row["b"].as_ref().unwrap();
            assert_eq!(b.rop(), Some(Metric::Finite(2.0 * *p as f64)));
        }
    }

    #[test]
    fn test_empty_inputs_give_empty_result() {
        let none: Vec<u64> = Vec::new();
        assert!(batch_estimate(none, vec![fixed("a", 1.0)], 1, false)
            .unwrap()
            .is_empty());
        let no_algs: Vec<Arc<dyn Algorithm<u64>>> = Vec::new();
        assert!(batch_estimate(vec![1u64], no_algs, 4, true).unwrap().is_empty());
    }

    #[test]
    fn test_isolation_keeps_other_cells() {
        let algs: Vec<Arc<dyn Algorithm<u64>>> =
            vec![fixed("a", 1.0), Arc::new(Failing), Arc::new(Infeasible)];
        let result = batch_estimate(vec![5u64, 6], algs, 2, true).unwrap();
        for row in result.values() {
            assert!(row["a"].is_ok());
            assert!(matches!(row["failing"], Err(EstimatorError::ArithmeticDomain(_))));
            let inf = row["infeasible"].as_ref().unwrap();
            assert_eq!(inf.rop(), Some(Metric::Unbounded));
        }
    }

    #[test]
    fn test_fault_aborts_without_isolation() {
        let algs: Vec<Arc<dyn Algorithm<u64>>> = vec![fixed("a", 1.0), Arc::new(Failing)];
        let err = batch_estimate(vec![1u64, 2], algs, 1, false).unwrap_err();
        assert!(matches!(err, EstimatorError::ArithmeticDomain(_)));

        let algs: Vec<Arc<dyn Algorithm<u64>>> = vec![fixed("a", 1.0), Arc::new(Failing)];
        assert!(batch_estimate(vec![1u64, 2], algs, 3, false).is_err());
    }

    #[test]
    fn test_panics_are_isolated() {
        let algs: Vec<Arc<dyn Algorithm<u64>>> = vec![fixed("a", 1.0), Arc::new(Panicking)];
        let result = batch_estimate(vec![1u64], algs, 2, true).unwrap();
        let row = &result[&1];
        assert!(row["a"].is_ok());
        match &row["panicking"] {
            Err(EstimatorError::Panicked { tag, message }) => {
                assert_eq!(tag, "panicking");
                assert_eq!(message, "model exploded");
            }
            other => panic!("expected a panic marker, got {:?}", other),
        }
    }

    #[test]
    fn test_panics_propagate_without_isolation() {
        let outcome = panic::catch_unwind(|| {
            let algs: Vec<Arc<dyn Algorithm<u64>>> = vec![Arc::new(Panicking)];
            batch_estimate(vec![1u64], algs, 1, false)
        });
        assert!(outcome.is_err());
    }

    #[test]
    fn test_same_tag_collapses() {
        let shared = fixed("a", 1.0);
        let registry = Registry::new()
            .register("first", Arc::clone(&shared))
            .register("second", shared);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["first", "second"]);

        let result = batch_estimate(vec![1u64], registry.algorithms(), 1, false).unwrap();
        assert_eq!(result[&1].len(), 1);
        assert!(result[&1].contains_key("a"));
    }

    #[test]
    fn test_taken_tag_keeps_first_model() {
        let algs = vec![fixed("a", 1.0), fixed("a", 5.0), fixed("b", 2.0)];
        let kept = unique_by_tag(algs);
        assert_eq!(kept.iter().map(|alg| alg.tag()).collect::<Vec<_>>(), vec!["a", "b"]);

        let result = batch_estimate(vec![3u64], kept, 1, false).unwrap();
        assert_eq!(result[&3]["a"].as_ref().unwrap().rop(), Some(Metric::Finite(3.0)));
    }

    #[test]
    fn test_duplicate_instances_collapse() {
        let result = batch_estimate(vec![7u64, 7, 7], vec![fixed("a", 1.0)], 1, false).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let params: Vec<u64> = (1..=16).collect();
        let algs = || vec![fixed("a", 1.0), fixed("b", 3.0)];
        let seq = batch_estimate(params.clone(), algs(), 1, false).unwrap();
        let par = batch_estimate(params, algs(), 4, false).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(matches!(
            batch_estimate(vec![1u64], vec![fixed("a", 1.0)], 0, false),
            Err(EstimatorError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_estimate_instance_drops_failures() {
        let registry = Registry::new()
            .register("a", fixed("a", 1.0))
            .register("failing", Arc::new(Failing) as Arc<dyn Algorithm<u64>>)
            .register("infeasible", Arc::new(Infeasible) as Arc<dyn Algorithm<u64>>);
        let results = estimate_instance(&registry, &3u64, 1, true).unwrap();
        assert_eq!(results.keys().collect::<Vec<_>>(), vec!["a", "infeasible"]);
        assert_eq!(results["infeasible"].rop(), Some(Metric::Unbounded));
    }
}

//! Attack-cost estimation for code equivalence and lattice isomorphism.
//!
//! Every cost model is an [`Algorithm`] over a parameter type and returns a
//! validated [`Cost`]. The [`batch`] dispatcher runs a set of models over a set
//! of parameter instances, optionally on a worker pool with per-cell fault
//! isolation; the [`pce::Estimate`] and [`lip::Estimate`] facades wrap it for
//! a single instance.
//!
//! ```
//! use pqce_estimator::{pce, Metric, PceParameters};
//!
//! let params = PceParameters::new(7, 128, 64, 50, 5);
//! let costs = pce::Estimate.full(&params, 1, true).unwrap();
//! assert!(costs["ssa"].is_feasible());
//! assert_eq!(costs["leon"].rop(), Some(Metric::Unbounded));
//! ```

pub mod batch;
pub mod conf;
pub mod cost;
pub mod error;
pub mod isd;
pub mod lip;
pub mod pce;
pub mod reduction;
pub mod report;
pub mod util;

pub use batch::{batch_estimate, Algorithm, BatchResult, Outcome, Registry};
pub use conf::EstimatorConfig;
pub use cost::{Cost, Metric, Problem, Value};
pub use error::{EstimatorError, Result};
pub use isd::{lee_brickell, IsdParameters};
pub use lip::{HavReg, HullAttack, LipParameters};
pub use pce::{Beullens, Bos, Leon, PceParameters, Ssa};
pub use reduction::{CostModel, ShapeModel};

//! Support-splitting algorithm.
//!
//! Exhaustive search over a hull-sized subspace followed by invariant
//! computation: `n³ + n²·q^h·ln(n)` operations while the hull dimension fits,
//! `h ≤ min(k, n−k)`, and infeasible otherwise.

use super::PceParameters;
use crate::batch::Algorithm;
use crate::cost::{Cost, Metric};
use crate::error::Result;
use crate::util::finite_or_overflow;

pub const TAG: &str = "ssa";

/// Support-splitting algorithm cost model.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ssa;

impl Ssa {
    /// Whether the hull is small enough for the attack to apply.
    pub fn applies(params: &PceParameters) -> bool {
        let (n, k, h) = (params.n() as i128, params.k() as i128, params.h() as i128);
        h <= k.min(n - k)
    }
}

impl Algorithm<PceParameters> for Ssa {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn estimate(&self, params: &PceParameters) -> Result<Cost> {
        let rop = if Self::applies(params) {
            let n = params.n() as f64;
            let q = params.q() as f64;
            let h = params.h() as f64;
            let rop = n.powi(3) + n * n * q.powf(h) * n.ln();
            Metric::Finite(finite_or_overflow(rop, &format!("SSA cost for {}", params))?)
        } else {
            Metric::Unbounded
        };

        Cost::with_rop(rop)
            .with_tag(TAG)
            .with_problem(*params)
            .validate()
    }
}

//! Bardet–Otmani–Saeed-Taha attack.
//!
//! Reduces code equivalence to weighted graph isomorphism, costed at
//! `C_wgi = exp(exp(sqrt(ln n)))`, on top of a combinatorial search term of
//! `n^w` for a trivial hull or `h·n^(w+h+1)` otherwise.

use super::PceParameters;
use crate::batch::Algorithm;
use crate::cost::{Cost, Metric};
use crate::error::Result;
use crate::util::exp2_checked;
use std::f64::consts::LN_2;

pub const TAG: &str = "bos";

#[derive(Clone, Copy, Debug, Default)]
pub struct Bos;

impl Bos {
    /// `log2` of the weighted graph isomorphism term.
    pub fn log2_graph_isomorphism(n: u64) -> f64 {
        (n as f64).ln().sqrt().exp() / LN_2
    }
}

impl Algorithm<PceParameters> for Bos {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn estimate(&self, params: &PceParameters) -> Result<Cost> {
        let log2_n = (params.n() as f64).log2();
        let w = params.w() as f64;
        let log2_search = match params.h() {
            0 => w * log2_n,
            h => (h as f64).log2() + (w + h as f64 + 1.0) * log2_n,
        };
        let log2_rop = log2_search + Self::log2_graph_isomorphism(params.n());
        let rop = exp2_checked(log2_rop, &format!("BOS cost for {}", params))?;

        Cost::with_rop(Metric::Finite(rop))
            .with_tag(TAG)
            .with_problem(*params)
            .validate()
    }
}

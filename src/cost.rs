//! Cost records produced by every attack model.
//!
//! A [`Cost`] is an ordered bag of named metrics. The reserved metric `rop`
//! (total word operations) is mandatory once a model has finished and is the
//! key all attacks are compared on. Infeasible attacks are not errors: they
//! carry `rop = Metric::Unbounded`, which is absorbing for addition and larger
//! than every finite cost.
//!
//! Two records combine key-wise with [`Cost::merge`]; the metadata fields `tag`
//! and `problem` are deliberately dropped by a merge because the merged record
//! describes a new composite attack.

use crate::error::{EstimatorError, Result};
use crate::lip::LipParameters;
use crate::pce::PceParameters;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;
use std::ops::Add;

/// Key of the total operation count.
pub const ROP: &str = "rop";

/// Rendering of the unbounded sentinel.
pub const UNBOUNDED_MARKER: &str = "∞";

/// An operation count: a non-negative real or the unbounded sentinel.
///
/// The derived ordering puts every `Finite` value below `Unbounded`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum Metric {
    Finite(f64),
    Unbounded,
}

impl Metric {
    pub fn is_finite(&self) -> bool {
        matches!(self, Metric::Finite(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Finite(v) => Some(*v),
            Metric::Unbounded => None,
        }
    }

    /// `log2` of a finite count, `None` for the sentinel.
    pub fn log2(&self) -> Option<f64> {
        self.value().map(f64::log2)
    }
}

impl Add for Metric {
    type Output = Metric;

    fn add(self, rhs: Metric) -> Metric {
        match (self, rhs) {
            (Metric::Finite(a), Metric::Finite(b)) => Metric::Finite(a + b),
            _ => Metric::Unbounded,
        }
    }
}

impl From<f64> for Metric {
    fn from(v: f64) -> Self {
        Metric::Finite(v)
    }
}

/// `≈2^x` rendering with `x = round(log2(count), 1)`.
impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Unbounded => write!(f, "{}", UNBOUNDED_MARKER),
            Metric::Finite(v) if *v == 0.0 => write!(f, "0"),
            Metric::Finite(v) => write!(f, "≈2^{:.1}", v.log2()),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Metric::Finite(v) => serializer.serialize_f64(*v),
            Metric::Unbounded => serializer.serialize_str("unbounded"),
        }
    }
}

/// A metric value stored in a [`Cost`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// Operation counts (`rop`, `red`, `non_red`, ...).
    Ops(Metric),
    /// Real-valued statistics such as the root-Hermite factor.
    Real(f64),
    /// Integral statistics such as a dimension.
    Int(u64),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Ops(m) => m.value(),
            Value::Real(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
        }
    }

    pub fn as_metric(&self) -> Option<Metric> {
        match self {
            Value::Ops(m) => Some(*m),
            _ => None,
        }
    }

    /// Key-wise addition used by [`Cost::merge`].
    pub fn combine(self, other: Value) -> Value {
        match (self, other) {
            (Value::Ops(a), Value::Ops(b)) => Value::Ops(a + b),
            (Value::Int(a), Value::Int(b)) => Value::Int(a.saturating_add(b)),
            (Value::Real(a), Value::Real(b)) => Value::Real(a + b),
            (Value::Ops(a), b) | (b, Value::Ops(a)) => match b.as_f64() {
                Some(v) => Value::Ops(a + Metric::Finite(v)),
                None => Value::Ops(Metric::Unbounded),
            },
            (a, b) => Value::Real(a.as_f64().unwrap_or(0.0) + b.as_f64().unwrap_or(0.0)),
        }
    }
}

impl From<Metric> for Value {
    fn from(m: Metric) -> Self {
        Value::Ops(m)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Int(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Ops(m) => write!(f, "{}", m),
            Value::Real(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{:.0}", v),
            Value::Real(v) => write!(f, "{:.6}", v),
            Value::Int(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Ops(m) => m.serialize(serializer),
            Value::Real(v) => serializer.serialize_f64(*v),
            Value::Int(v) => serializer.serialize_u64(*v),
        }
    }
}

/// The parameter instance a cost was computed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind")]
pub enum Problem {
    Pce(PceParameters),
    Lip(LipParameters),
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Pce(p) => write!(f, "{}", p),
            Problem::Lip(p) => write!(f, "{}", p),
        }
    }
}

impl From<PceParameters> for Problem {
    fn from(p: PceParameters) -> Self {
        Problem::Pce(p)
    }
}

impl From<LipParameters> for Problem {
    fn from(p: LipParameters) -> Self {
        Problem::Lip(p)
    }
}

/// Cost of one attack on one parameter instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cost {
    metrics: Vec<(String, Value)>,
    tag: Option<String>,
    problem: Option<Problem>,
}

impl Cost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whose only metric is `rop`.
    pub fn with_rop(rop: Metric) -> Self {
        let mut cost = Self::new();
        cost.set_rop(rop);
        cost
    }

    /// Set `key` to `value`, keeping the position of an existing key.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.metrics.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.metrics.push((key.to_string(), value)),
        }
    }

    pub fn set_rop(&mut self, rop: Metric) {
        self.set(ROP, Value::Ops(rop));
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.metrics
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    pub fn rop(&self) -> Option<Metric> {
        self.get(ROP).and_then(|v| v.as_metric())
    }

    /// True when `rop` is present and finite.
    pub fn is_feasible(&self) -> bool {
        self.rop().map_or(false, |m| m.is_finite())
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = Some(tag.into());
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.set_tag(tag);
        self
    }

    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }

    pub fn set_problem(&mut self, problem: impl Into<Problem>) {
        self.problem = Some(problem.into());
    }

    pub fn with_problem(mut self, problem: impl Into<Problem>) -> Self {
        self.set_problem(problem);
        self
    }

    /// Metric keys in declaration order, `rop` included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|(k, _)| k.as_str())
    }

    /// Metrics other than `rop`, in declaration order.
    pub fn extras(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.metrics
            .iter()
            .filter(|(k, _)| k != ROP)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Key-wise combination of two records.
    ///
    /// Metrics present on both sides are added (see [`Value::combine`]),
    /// metrics present on one side are copied. `tag` and `problem` are left
    /// unset for the caller to fill in.
    pub fn merge(&self, other: &Cost) -> Cost {
        let mut merged = Cost::new();
        for (key, value) in &self.metrics {
            let value = match other.get(key) {
                Some(rhs) => value.combine(rhs),
                None => *value,
            };
            merged.metrics.push((key.clone(), value));
        }
        for (key, value) in &other.metrics {
            if self.get(key).is_none() {
                merged.metrics.push((key.clone(), *value));
            }
        }
        merged
    }

    /// Mandatory sanity check before a record leaves a cost model.
    pub fn validate(self) -> Result<Cost> {
        match self.get(ROP) {
            None => Err(EstimatorError::MalformedCost(format!(
                "`rop` missing from {} cost",
                self.tag.as_deref().unwrap_or("untagged")
            ))),
            Some(Value::Ops(Metric::Unbounded)) => Ok(self),
            Some(Value::Ops(Metric::Finite(v))) if v.is_finite() && v >= 0.0 => Ok(self),
            Some(other) => Err(EstimatorError::MalformedCost(format!(
                "`rop` must be a non-negative operation count or unbounded, got {:?}",
                other
            ))),
        }
    }
}

/// Greek display names used by the estimator's reports.
fn display_key(key: &str) -> &str {
    match key {
        "delta" => "δ",
        "beta" => "β",
        other => other,
    }
}

/// `rop` first, then every other metric in declaration order.
impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rop() {
            Some(rop) => write!(f, "rop: {}", rop)?,
            None => write!(f, "rop: unset")?,
        }
        for (key, value) in self.extras() {
            write!(f, ", {}: {}", display_key(key), value)?;
        }
        Ok(())
    }
}

impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let extra = self.tag.is_some() as usize + self.problem.is_some() as usize;
        let mut map = serializer.serialize_map(Some(self.metrics.len() + extra))?;
        if let Some(rop) = self.get(ROP) {
            map.serialize_entry(ROP, &rop)?;
        }
        for (key, value) in self.extras() {
            map.serialize_entry(key, value)?;
        }
        if let Some(tag) = &self.tag {
            map.serialize_entry("tag", tag)?;
        }
        if let Some(problem) = &self.problem {
            map.serialize_entry("problem", problem)?;
        }
        map.end()
    }
}

//! # Metrics Module
//!
//! The metric emission contract between the collectors and the reporting layer.
//!
//! Collectors only *classify* and *name* values: a [`MetricAssertion`] is either a gauge (a
//! point-in-time value reported as-is) or a counter (a monotonically non-decreasing
//! cumulative total). Rate computation over counters, aggregation windowing and transmission
//! belong to whatever implements [`MetricSink`]; see [`ReportSink`] for the built-in
//! receiver.

pub mod report;

use serde::Serialize;
pub use report::ReportSink;

/// The unit a metric value is labeled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Connections,
    Ops,
    Bytes,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Connections => "connections",
            Unit::Ops => "ops",
            Unit::Bytes => "bytes",
        }
    }
}

/// Whether a value is reported as-is or rate-normalized by the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Gauge,
    Counter,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
        }
    }
}

/// One reported metric value. Immutable; has no identity beyond its name within one cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricAssertion {
    pub name: String,
    pub kind: MetricKind,
    pub unit: Unit,
    pub value: f64,
}

/// The emission contract the collectors hand each assertion through.
pub trait MetricSink {
    /// Report a point-in-time value.
    fn gauge(&mut self, name: String, unit: Unit, value: f64);

    /// Report a cumulative total. The receiver owns the rate math.
    fn counter(&mut self, name: String, unit: Unit, value: f64);
}

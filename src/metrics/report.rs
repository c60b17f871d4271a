//! The built-in receiver side of the metric emission contract.
//!
//! [`ReportSink`] records every assertion of the current poll cycle, rate-normalizes counters
//! against the previous cycle's cumulative values (a negative delta is treated as a counter
//! reset and the later value is used), and renders the result as a terminal table, a JSON
//! summary, or an HTTP POST to a monitoring endpoint.

use crate::metrics::{
    MetricAssertion,
    MetricKind,
    MetricSink,
    Unit,
};
use chrono::{
    DateTime,
    Utc,
};
use comfy_table::{
    presets,
    Attribute,
    Cell,
    ContentArrangement,
    Table,
};
use eyre::Result;
use std::collections::HashMap;

/// Collects one cycle's assertions and keeps the previous cycle's counter values so counters
/// can be reported as per-cycle deltas.
pub struct ReportSink {
    assertions: Vec<MetricAssertion>,
    previous_counters: HashMap<String, f64>,
    cycle_start: DateTime<Utc>,
}

impl ReportSink {
    pub fn new() -> Self {
        Self {
            assertions: Vec::new(),
            previous_counters: HashMap::new(),
            cycle_start: Utc::now(),
        }
    }

    /// Start a new poll cycle: the counters observed last cycle become the rate baseline, and
    /// the assertion list is cleared.
    pub fn begin_cycle(&mut self) {
        for assertion in self.assertions.drain(..) {
            if assertion.kind == MetricKind::Counter {
                self.previous_counters.insert(assertion.name, assertion.value);
            }
        }
        self.cycle_start = Utc::now();
    }

    /// All assertions recorded this cycle, in emission order.
    pub fn assertions(&self) -> &[MetricAssertion] {
        &self.assertions
    }

    /// Per-cycle delta for a counter value against the previous cycle's baseline.
    ///
    /// A counter that went backwards has been reset; the later value is the whole delta. A
    /// counter without a baseline contributes nothing yet (the first observation only
    /// establishes the baseline).
    fn counter_delta(&self, name: &str, value: f64) -> f64 {
        match self.previous_counters.get(name) {
            Some(&previous) if value >= previous => value - previous,
            Some(_) => value,
            None => 0.0,
        }
    }

    /// Format this cycle's metrics for terminal display.
    pub fn format(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Metric").add_attribute(Attribute::Bold),
                Cell::new("Kind").add_attribute(Attribute::Bold),
                Cell::new("Unit").add_attribute(Attribute::Bold),
                Cell::new("Value").add_attribute(Attribute::Bold),
                Cell::new("Delta/cycle").add_attribute(Attribute::Bold),
            ]);

        for assertion in &self.assertions {
            let delta = match assertion.kind {
                MetricKind::Gauge => String::new(),
                MetricKind::Counter => format!("{:.1}", self.counter_delta(&assertion.name, assertion.value)),
            };
            table.add_row(vec![
                Cell::new(&assertion.name),
                Cell::new(assertion.kind.as_str()),
                Cell::new(assertion.unit.as_str()),
                Cell::new(format!("{:.1}", assertion.value)),
                Cell::new(delta),
            ]);
        }

        format!(
            "RethinkDB metrics collected at {} ({} values)\n{}\n",
            self.cycle_start.format("%Y-%m-%d %H:%M:%S UTC"),
            self.assertions.len(),
            table
        )
    }

    /// JSON summary of this cycle, suitable for file export or publishing.
    pub fn summary(&self) -> serde_json::Value {
        let counter_deltas: HashMap<&str, f64> = self
            .assertions
            .iter()
            .filter(|a| a.kind == MetricKind::Counter)
            .map(|a| (a.name.as_str(), self.counter_delta(&a.name, a.value)))
            .collect();

        serde_json::json!({
            "collected_at": self.cycle_start,
            "metrics": self.assertions,
            "counter_deltas": counter_deltas,
        })
    }

    /// POST this cycle's JSON summary to a monitoring endpoint.
    pub async fn publish(&self, client: &reqwest::Client, url: &str) -> Result<()> {
        client
            .post(url)
            .json(&self.summary())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl Default for ReportSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSink for ReportSink {
    fn gauge(&mut self, name: String, unit: Unit, value: f64) {
        self.assertions.push(MetricAssertion {
            name,
            kind: MetricKind::Gauge,
            unit,
            value,
        });
    }

    fn counter(&mut self, name: String, unit: Unit, value: f64) {
        self.assertions.push(MetricAssertion {
            name,
            kind: MetricKind::Counter,
            unit,
            value,
        });
    }
}

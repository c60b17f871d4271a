//! # RethinkDB Stats Gatherer
//!
//! A polling collector that queries a RethinkDB cluster for operational statistics and
//! republishes them as a hierarchical set of named metrics.
//!
//! ## Features
//!
//! - **Cluster-level metrics**: Active clients, connections, insert/query/read throughput
//! - **Member-level metrics**: The same query-engine shape plus lifetime operation counters
//! - **Table-level metrics**: Per-(database, table) throughput, cache and disk usage
//! - **Gauge/counter classification**: Point-in-time values vs. cumulative totals that the
//!   reporting layer rate-normalizes
//! - **Terminal report and JSON export**: Rendered after every poll cycle
//!
//! ## Architecture
//!
//! The tool is built with a modular architecture where each piece is self-contained:
//!
//! - **`config`**: Configuration management
//! - **`source`**: The data-source query interface and the ReQL wire client behind it
//! - **`stats`**: Strongly-typed statistics documents (missing numeric fields are zero)
//! - **`topology`**: Resolves which cluster member this collector is attached to
//! - **`namespace`**: Pure construction of hierarchical metric names
//! - **`metrics`**: The metric emission contract and the report sink that receives it
//! - **`collectors`**: Per-scope collection logic and the per-cycle orchestrator
//!
//! One poll cycle is: connect, gather, transform, publish, disconnect. The connection is
//! exclusively owned by the cycle and closed on every exit path.

pub mod collectors;
pub mod config;
pub mod metrics;
pub mod namespace;
pub mod source;
pub mod stats;
pub mod topology;

pub use collectors::Orchestrator;
pub use config::Config;
pub use metrics::{
    MetricAssertion,
    MetricKind,
    MetricSink,
    ReportSink,
    Unit,
};
pub use namespace::Namespace;
pub use source::{
    ReqlSource,
    SourceError,
    StatsSource,
};
pub use stats::MemberId;

//! # Collectors Module
//!
//! This module contains the core data collection logic for the stats gatherer.
//!
//! ## Architecture
//!
//! - **`cluster`**: Projects the cluster-wide statistics document (5 gauges)
//! - **`member`**: Projects one member's statistics document (5 gauges, 3 counters)
//! - **`table`**: Scans the table list and projects per-table statistics (13 values each)
//! - **`Orchestrator`**: Drives one full poll cycle and owns the failure semantics
//!
//! ## Failure semantics
//!
//! A failed branch degrades the cycle to "fewer metrics", never more: cluster and member
//! failures abort only their own branch, a per-table read failure skips only that table, and
//! a topology miss skips the member and table branches while the cluster branch still runs.
//! Nothing here is fatal to the host process.

pub mod cluster;
pub mod member;
pub mod orchestrator;
pub mod table;

pub use orchestrator::Orchestrator;

#[cfg(test)]
pub(crate) mod testing {
    use crate::{
        metrics::{
            MetricAssertion,
            MetricKind,
            MetricSink,
            Unit,
        },
        source::{
            SourceError,
            StatsSource,
        },
        stats::{
            ClusterStats,
            MemberId,
            MemberStats,
            ServerStatus,
            TableStats,
            TableStatus,
        },
    };
    use std::collections::HashMap;

    /// In-memory stand-in for a RethinkDB connection. A `None` document or an absent map
    /// entry produces `SourceError::Missing`, the same signal a failed point read gives.
    #[derive(Debug, Default)]
    pub struct MockSource {
        pub members: Vec<ServerStatus>,
        pub cluster: Option<ClusterStats>,
        pub member: Option<MemberStats>,
        pub tables: Vec<TableStatus>,
        pub table_stats: HashMap<String, TableStats>,
    }

    impl StatsSource for MockSource {
        async fn server_status(&mut self) -> Result<Vec<ServerStatus>, SourceError> {
            Ok(self.members.clone())
        }

        async fn cluster_stats(&mut self) -> Result<ClusterStats, SourceError> {
            self.cluster.clone().ok_or(SourceError::Missing)
        }

        async fn member_stats(&mut self, _member: &MemberId) -> Result<MemberStats, SourceError> {
            self.member.clone().ok_or(SourceError::Missing)
        }

        async fn table_status(&mut self) -> Result<Vec<TableStatus>, SourceError> {
            Ok(self.tables.clone())
        }

        async fn table_stats(&mut self, table_id: &str, _member: &MemberId) -> Result<TableStats, SourceError> {
            self.table_stats.get(table_id).cloned().ok_or(SourceError::Missing)
        }
    }

    /// Records every assertion for inspection.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub assertions: Vec<MetricAssertion>,
    }

    impl RecordingSink {
        pub fn find(&self, name: &str) -> Option<&MetricAssertion> {
            self.assertions.iter().find(|a| a.name == name)
        }

        pub fn names(&self) -> Vec<&str> {
            self.assertions.iter().map(|a| a.name.as_str()).collect()
        }
    }

    impl MetricSink for RecordingSink {
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
}

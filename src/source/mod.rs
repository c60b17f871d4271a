//! # Data Source Module
//!
//! The abstract query capability the collectors run against, and the ReQL wire client
//! implementing it.
//!
//! The collectors only need two query shapes: point reads by primary key and equality scans
//! over a named system table. [`StatsSource`] expresses exactly that, so the collection logic
//! is testable against an in-memory source, while [`ReqlSource`] provides the real
//! RethinkDB-backed implementation.

pub mod reql;
pub mod term;

pub use reql::ReqlSource;

use crate::stats::{
    ClusterStats,
    MemberId,
    MemberStats,
    ServerStatus,
    TableStats,
    TableStatus,
};
use thiserror::Error;

/// Failures of the data-source layer. None of these are fatal to the host process; each one
/// degrades the current poll cycle to "fewer metrics".
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to connect to {addr}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("handshake rejected: {0}")]
    Handshake(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed response: {0}")]
    Protocol(String),

    #[error("invalid document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("query failed: {0}")]
    Query(String),

    #[error("document not found")]
    Missing,
}

/// The document query capability one poll cycle consumes.
///
/// All methods take `&mut self`: the underlying connection is exclusively owned for the
/// duration of one cycle and queries within a cycle are sequential.
#[allow(async_fn_in_trait)]
pub trait StatsSource {
    /// Scan the `server_status` table: all cluster member records.
    async fn server_status(&mut self) -> Result<Vec<ServerStatus>, SourceError>;

    /// Point read of the cluster-wide statistics document.
    async fn cluster_stats(&mut self) -> Result<ClusterStats, SourceError>;

    /// Point read of one member's statistics document.
    async fn member_stats(&mut self, member: &MemberId) -> Result<MemberStats, SourceError>;

    /// Scan the `table_status` table: all known tables.
    async fn table_status(&mut self) -> Result<Vec<TableStatus>, SourceError>;

    /// Point read of one table's statistics as observed by one member.
    async fn table_stats(&mut self, table_id: &str, member: &MemberId) -> Result<TableStats, SourceError>;
}

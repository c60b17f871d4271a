//! # Statistics Documents
//!
//! Strongly-typed views of the documents the collector reads from RethinkDB's `rethinkdb`
//! system database:
//!
//! - **`ClusterStats`**: `stats` table, key `["cluster"]`
//! - **`MemberStats`**: `stats` table, key `["server", member_id]`
//! - **`TableStats`**: `stats` table, key `["table_server", table_id, member_id]`
//! - **`ServerStatus`**: rows of the `server_status` table (topology data)
//! - **`TableStatus`**: rows of the `table_status` table (which tables exist)
//!
//! Every numeric field defaults to zero when absent from the source document; a missing
//! field is "no activity", never an error. `TableStats` carries its own `db`/`table` fields,
//! which are authoritative for metric naming regardless of which table id was used to fetch
//! the document.

use serde::{
    Deserialize,
    Serialize,
};
use std::fmt;

/// Identity of one cluster member, resolved fresh each poll cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The `query_engine` sub-document shared by cluster, member and table stats.
///
/// The `*_per_sec` fields are instantaneous rates the server already computed (gauges); the
/// `*_total` fields are lifetime cumulative totals (counters).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryEngine {
    #[serde(default)]
    pub clients_active: f64,
    #[serde(default)]
    pub client_connections: f64,
    #[serde(default)]
    pub written_docs_per_sec: f64,
    #[serde(default)]
    pub queries_per_sec: f64,
    #[serde(default)]
    pub read_docs_per_sec: f64,
    #[serde(default)]
    pub written_docs_total: f64,
    #[serde(default)]
    pub queries_total: f64,
    #[serde(default)]
    pub read_docs_total: f64,
}

/// Cluster-wide statistics document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterStats {
    #[serde(default)]
    pub query_engine: QueryEngine,
}

/// Statistics for one cluster member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberStats {
    #[serde(default)]
    pub query_engine: QueryEngine,
}

/// Statistics for one (database, table) pair as observed by one member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableStats {
    #[serde(default)]
    pub db: String,
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub query_engine: QueryEngine,
    #[serde(default)]
    pub storage_engine: StorageEngine,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageEngine {
    #[serde(default)]
    pub cache: CacheStats,
    #[serde(default)]
    pub disk: DiskStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    #[serde(default)]
    pub in_use_bytes: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskStats {
    #[serde(default)]
    pub written_bytes_per_sec: f64,
    #[serde(default)]
    pub read_bytes_per_sec: f64,
    #[serde(default)]
    pub written_bytes_total: f64,
    #[serde(default)]
    pub read_bytes_total: f64,
    #[serde(default)]
    pub space_usage: SpaceUsage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceUsage {
    #[serde(default)]
    pub data_bytes: f64,
    #[serde(default)]
    pub garbage_bytes: f64,
    #[serde(default)]
    pub metadata_bytes: f64,
    #[serde(default)]
    pub preallocated_bytes: f64,
}

/// One row of the `server_status` system table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub id: MemberId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub network: Network,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    #[serde(default)]
    pub canonical_addresses: Vec<CanonicalAddress>,
}

/// A network address by which a member advertises itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalAddress {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
}

/// One row of the `table_status` system table. Only the coordinates are needed here; the
/// per-table statistics come from a separate point read into the `stats` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableStatus {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub db: String,
    #[serde(default)]
    pub name: String,
}

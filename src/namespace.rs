//! Hierarchical metric names.
//!
//! Pure construction of `/`-separated metric paths, one namespace per statistics scope:
//!
//! - Cluster: `Connections/Active`, `Operations/Insert`, ...
//! - Member: the same leaves under `Member/`
//! - Table: leaves under `Database/{db}/Table/{table}/`
//!
//! Table namespaces are always anchored on the statistics document's own `db`/`table` fields,
//! never on the caller-requested table id, so names stay correct across topology churn.

use crate::stats::TableStats;

/// The scope prefix a metric leaf is qualified with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: Option<String>,
}

impl Namespace {
    /// Cluster scope: leaves are used unprefixed.
    pub fn cluster() -> Self {
        Self { prefix: None }
    }

    /// Member scope: leaves under `Member/`.
    pub fn member() -> Self {
        Self {
            prefix: Some("Member".to_string()),
        }
    }

    /// Table scope for a (database, table) pair: leaves under `Database/{db}/Table/{table}/`.
    pub fn table(db: &str, table: &str) -> Self {
        Self {
            prefix: Some(format!("Database/{db}/Table/{table}")),
        }
    }

    /// Table scope anchored on the document's own declared coordinates.
    pub fn for_table_stats(stats: &TableStats) -> Self {
        Self::table(&stats.db, &stats.table)
    }

    /// Fully-qualified name for a metric leaf.
    pub fn metric(&self, leaf: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}/{leaf}"),
            None => leaf.to_string(),
        }
    }
}

//! ReQL term construction.
//!
//! The JSON driver protocol encodes a query as a nested array of `[TERM_TYPE, [args...]]`
//! nodes. Only the handful of term types the collector needs are represented here; terms are
//! plain `serde_json::Value`s so they can be built and inspected without a connection.

use serde_json::{
    json,
    Value,
};

// Term types from the ReQL protocol definition.
pub const MAKE_ARRAY: u64 = 2;
pub const DB: u64 = 14;
pub const TABLE: u64 = 15;
pub const GET: u64 = 16;

/// The system database all statistics tables live in.
pub const SYSTEM_DB: &str = "rethinkdb";

/// `r.db(name)`
pub fn db(name: &str) -> Value {
    json!([DB, [name]])
}

/// `db.table(name)`
pub fn table(db_term: Value, name: &str) -> Value {
    json!([TABLE, [db_term, name]])
}

/// `table.get(key)`
pub fn get(table_term: Value, key: Value) -> Value {
    json!([GET, [table_term, key]])
}

/// A compound primary key. Literal arrays in term position must be wrapped in `MAKE_ARRAY` to
/// distinguish a datum from a term node.
pub fn compound_key(parts: &[&str]) -> Value {
    json!([MAKE_ARRAY, parts])
}

/// `r.db("rethinkdb").table(name)`: scan of a system table.
pub fn system_table(name: &str) -> Value {
    table(db(SYSTEM_DB), name)
}

/// `r.db("rethinkdb").table(name).get(key)`: point read into a system table.
pub fn system_table_get(name: &str, key_parts: &[&str]) -> Value {
    get(system_table(name), compound_key(key_parts))
}

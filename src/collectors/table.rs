//! Table-scope collection: scan the table list, then one point read per table.
//!
//! One table's read failure skips only that table; sibling tables still report. The metric
//! namespace is anchored on each statistics document's own `db`/`table` fields; the caller
//! only selects *which* table status to fetch.

use crate::{
    metrics::{
        MetricSink,
        Unit,
    },
    namespace::Namespace,
    source::{
        SourceError,
        StatsSource,
    },
    stats::{
        MemberId,
        TableStats,
    },
};
use tracing::warn;

/// Fetch statistics for every known table as observed by the resolved member.
pub async fn collect_tables<S, K>(source: &mut S, member: &MemberId, sink: &mut K) -> Result<(), SourceError>
where
    S: StatsSource,
    K: MetricSink,
{
    let tables = source.table_status().await?;

    for table in tables {
        match source.table_stats(&table.id, member).await {
            Ok(stats) => record_table(&stats, sink),
            Err(error) => {
                warn!(db = %table.db, table = %table.name, %error, "skipping table statistics");
            }
        }
    }

    Ok(())
}

fn record_table(stats: &TableStats, sink: &mut impl MetricSink) {
    let ns = Namespace::for_table_stats(stats);
    let query_engine = &stats.query_engine;
    let storage = &stats.storage_engine;
    let disk = &storage.disk;
    let space = &disk.space_usage;

    sink.gauge(
        ns.metric("Operations/Insert"),
        Unit::Ops,
        query_engine.written_docs_per_sec,
    );
    sink.gauge(ns.metric("Operations/Read"), Unit::Ops, query_engine.read_docs_per_sec);
    sink.counter(
        ns.metric("Operations/Inserts Processed"),
        Unit::Ops,
        query_engine.written_docs_total,
    );
    sink.counter(
        ns.metric("Operations/Reads Processed"),
        Unit::Ops,
        query_engine.read_docs_total,
    );

    sink.gauge(ns.metric("Storage/Cache"), Unit::Bytes, storage.cache.in_use_bytes);

    sink.gauge(ns.metric("Storage/Disk/Write"), Unit::Bytes, disk.written_bytes_per_sec);
    sink.gauge(ns.metric("Storage/Disk/Read"), Unit::Bytes, disk.read_bytes_per_sec);
    sink.counter(
        ns.metric("Storage/Disk/Writes Processed"),
        Unit::Bytes,
        disk.written_bytes_total,
    );
    sink.counter(
        ns.metric("Storage/Disk/Reads Processed"),
        Unit::Bytes,
        disk.read_bytes_total,
    );

    sink.gauge(ns.metric("Storage/Space/Data"), Unit::Bytes, space.data_bytes);
    sink.gauge(ns.metric("Storage/Space/Garbage"), Unit::Bytes, space.garbage_bytes);
    sink.gauge(ns.metric("Storage/Space/Metadata"), Unit::Bytes, space.metadata_bytes);
    sink.gauge(
        ns.metric("Storage/Space/Preallocated"),
        Unit::Bytes,
        space.preallocated_bytes,
    );
}

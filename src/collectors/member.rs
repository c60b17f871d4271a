//! Member-scope collection: the query-engine gauges under `Member/` plus the lifetime
//! operation counters.

use crate::{
    collectors::cluster::record_query_engine_gauges,
    metrics::{
        MetricSink,
        Unit,
    },
    namespace::Namespace,
    source::{
        SourceError,
        StatsSource,
    },
    stats::MemberId,
};

/// Fetch the resolved member's statistics document and project it.
pub async fn collect_member<S, K>(source: &mut S, member: &MemberId, sink: &mut K) -> Result<(), SourceError>
where
    S: StatsSource,
    K: MetricSink,
{
    let stats = source.member_stats(member).await?;
    let ns = Namespace::member();
    let query_engine = &stats.query_engine;

    record_query_engine_gauges(&ns, query_engine, sink);

    sink.counter(
        ns.metric("Operations/Inserts Processed"),
        Unit::Ops,
        query_engine.written_docs_total,
    );
    sink.counter(
        ns.metric("Operations/Queries Processed"),
        Unit::Ops,
        query_engine.queries_total,
    );
    sink.counter(
        ns.metric("Operations/Reads Processed"),
        Unit::Ops,
        query_engine.read_docs_total,
    );

    Ok(())
}

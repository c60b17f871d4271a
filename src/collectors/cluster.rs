//! Cluster-scope collection: one point read, five gauges.

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
    stats::QueryEngine,
};

/// Fetch the cluster-wide statistics document and project it.
pub async fn collect_cluster<S, K>(source: &mut S, sink: &mut K) -> Result<(), SourceError>
where
    S: StatsSource,
    K: MetricSink,
{
    let stats = source.cluster_stats().await?;
    record_query_engine_gauges(&Namespace::cluster(), &stats.query_engine, sink);
    Ok(())
}

/// The five query-engine gauges shared by the cluster and member scopes.
pub(crate) fn record_query_engine_gauges(ns: &Namespace, query_engine: &QueryEngine, sink: &mut impl MetricSink) {
    sink.gauge(
        ns.metric("Connections/Active"),
        Unit::Connections,
        query_engine.clients_active,
    );
    sink.gauge(
        ns.metric("Connections/Current"),
        Unit::Connections,
        query_engine.client_connections,
    );
    sink.gauge(
        ns.metric("Operations/Insert"),
        Unit::Ops,
        query_engine.written_docs_per_sec,
    );
    sink.gauge(ns.metric("Operations/Query"), Unit::Ops, query_engine.queries_per_sec);
    sink.gauge(ns.metric("Operations/Read"), Unit::Ops, query_engine.read_docs_per_sec);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        collectors::testing::{
            MockSource,
            RecordingSink,
        },
        metrics::MetricKind,
        stats::ClusterStats,
    };
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn projects_the_five_cluster_gauges() {
        let mut source = MockSource {
            cluster: Some(ClusterStats {
                query_engine: QueryEngine {
                    clients_active: 5.0,
                    client_connections: 12.0,
                    written_docs_per_sec: 3.2,
                    queries_per_sec: 9.1,
                    read_docs_per_sec: 4.0,
                    ..QueryEngine::default()
                },
            }),
            ..MockSource::default()
        };
        let mut sink = RecordingSink::default();

        collect_cluster(&mut source, &mut sink).await.unwrap();

        let expected = [
            ("Connections/Active", 5.0),
            ("Connections/Current", 12.0),
            ("Operations/Insert", 3.2),
            ("Operations/Query", 9.1),
            ("Operations/Read", 4.0),
        ];
        assert_eq!(sink.assertions.len(), expected.len());
        for (name, value) in expected {
            let assertion = sink.find(name).unwrap_or_else(|| panic!("missing {name}"));
            assert_eq!(assertion.kind, MetricKind::Gauge);
            assert_eq!(assertion.value, value, "{name}");
        }
    }

    #[tokio::test]
    async fn absent_fields_are_reported_as_zero() {
        let mut source = MockSource {
            cluster: Some(ClusterStats::default()),
            ..MockSource::default()
        };
        let mut sink = RecordingSink::default();

        collect_cluster(&mut source, &mut sink).await.unwrap();

        assert_eq!(sink.assertions.len(), 5);
        assert!(sink.assertions.iter().all(|a| a.value == 0.0));
    }

    #[tokio::test]
    async fn missing_document_is_an_error_for_this_branch() {
        let mut source = MockSource::default();
        let mut sink = RecordingSink::default();

        assert!(collect_cluster(&mut source, &mut sink).await.is_err());
        assert!(sink.assertions.is_empty());
    }
}

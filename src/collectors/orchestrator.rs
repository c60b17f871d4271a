//! Drives one full poll cycle: connect, resolve the local member, run the three collection
//! branches, publish through the sink, disconnect.

use crate::{
    collectors::{
        cluster::collect_cluster,
        member::collect_member,
        table::collect_tables,
    },
    config::Config,
    metrics::{
        MetricSink,
        ReportSink,
    },
    source::{
        ReqlSource,
        StatsSource,
    },
    topology::resolve_local_member,
};
use eyre::Result;
use tracing::{
    debug,
    warn,
};

pub struct Orchestrator {
    config: Config,
}

impl Orchestrator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run one poll cycle against a fresh connection.
    ///
    /// A connection failure is the only error this returns; everything past the connect
    /// degrades to fewer metrics. The connection is closed on every exit path.
    pub async fn run_cycle(&self, sink: &mut ReportSink) -> Result<()> {
        sink.begin_cycle();

        let mut source = ReqlSource::connect(&self.config).await?;
        self.collect_all(&mut source, sink).await;
        source.close().await;

        debug!(metrics = sink.assertions().len(), "poll cycle finished");
        Ok(())
    }

    /// The gather/transform part of a cycle, independent of the connection lifetime.
    async fn collect_all<S: StatsSource>(&self, source: &mut S, sink: &mut impl MetricSink) {
        if let Err(error) = collect_cluster(source, sink).await {
            warn!(%error, "cluster statistics unavailable");
        }

        // Member identity is recomputed every cycle; topology may have changed.
        let candidates = match source.server_status().await {
            Ok(candidates) => candidates,
            Err(error) => {
                warn!(%error, "server status unavailable, skipping member and table statistics");
                return;
            }
        };

        let Some(member) = resolve_local_member(&candidates, &self.config.host) else {
            warn!(
                host = %self.config.host,
                "no cluster member advertises the configured host, skipping member and table statistics"
            );
            return;
        };
        debug!(%member, "resolved local cluster member");

        if let Err(error) = collect_member(source, &member, sink).await {
            warn!(%member, %error, "member statistics unavailable");
        }

        if let Err(error) = collect_tables(source, &member, sink).await {
            warn!(%member, %error, "table statistics unavailable");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        collectors::testing::{
            MockSource,
            RecordingSink,
        },
        stats::{
            CanonicalAddress,
            ClusterStats,
            MemberId,
            MemberStats,
            Network,
            QueryEngine,
            ServerStatus,
            TableStats,
            TableStatus,
        },
    };
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn config_for_host(host: &str) -> Config {
        Config::new(host.to_string(), 28015, None, Duration::from_secs(60), None, None)
    }

    fn topology() -> Vec<ServerStatus> {
        let member = |id: &str, hosts: &[&str]| ServerStatus {
            id: MemberId(id.to_string()),
            name: id.to_string(),
            network: Network {
                canonical_addresses: hosts
                    .iter()
                    .map(|host| CanonicalAddress {
                        host: host.to_string(),
                        port: 29015,
                    })
                    .collect(),
            },
        };
        vec![member("m1", &["10.0.0.1"]), member("m2", &["10.0.0.2", "localhost"])]
    }

    fn populated_source() -> MockSource {
        MockSource {
            members: topology(),
            cluster: Some(ClusterStats {
                query_engine: QueryEngine {
                    clients_active: 5.0,
                    ..QueryEngine::default()
                },
            }),
            member: Some(MemberStats::default()),
            tables: vec![TableStatus {
                id: "tbl-1".to_string(),
                db: "app".to_string(),
                name: "users".to_string(),
            }],
            table_stats: [(
                "tbl-1".to_string(),
                TableStats {
                    db: "app".to_string(),
                    table: "users".to_string(),
                    ..TableStats::default()
                },
            )]
            .into(),
        }
    }

    #[tokio::test]
    async fn full_cycle_reports_all_three_scopes() {
        let orchestrator = Orchestrator::new(config_for_host("localhost"));
        let mut source = populated_source();
        let mut sink = RecordingSink::default();

        orchestrator.collect_all(&mut source, &mut sink).await;

        // 5 cluster + 8 member + 13 table values.
        assert_eq!(sink.assertions.len(), 26);
        assert!(sink.find("Connections/Active").is_some());
        assert!(sink.find("Member/Operations/Queries Processed").is_some());
        assert!(sink.find("Database/app/Table/users/Storage/Cache").is_some());
    }

    #[tokio::test]
    async fn every_metric_name_is_emitted_exactly_once_per_cycle() {
        let orchestrator = Orchestrator::new(config_for_host("localhost"));
        let mut source = populated_source();
        let mut sink = RecordingSink::default();

        orchestrator.collect_all(&mut source, &mut sink).await;

        let mut names = sink.names();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[tokio::test]
    async fn topology_miss_skips_member_and_table_scopes_only() {
        let orchestrator = Orchestrator::new(config_for_host("not-in-topology"));
        let mut source = populated_source();
        let mut sink = RecordingSink::default();

        orchestrator.collect_all(&mut source, &mut sink).await;

        assert_eq!(sink.assertions.len(), 5);
        assert!(sink.names().iter().all(|name| !name.starts_with("Member/")));
        assert!(sink.names().iter().all(|name| !name.starts_with("Database/")));
    }

    #[tokio::test]
    async fn cluster_branch_failure_does_not_block_the_others() {
        let orchestrator = Orchestrator::new(config_for_host("localhost"));
        let mut source = populated_source();
        source.cluster = None;
        let mut sink = RecordingSink::default();

        orchestrator.collect_all(&mut source, &mut sink).await;

        assert!(sink.find("Connections/Active").is_none());
        assert!(sink.find("Member/Connections/Active").is_some());
        assert!(sink.find("Database/app/Table/users/Operations/Read").is_some());
    }

    #[tokio::test]
    async fn member_branch_failure_does_not_block_tables() {
        let orchestrator = Orchestrator::new(config_for_host("localhost"));
        let mut source = populated_source();
        source.member = None;
        let mut sink = RecordingSink::default();

        orchestrator.collect_all(&mut source, &mut sink).await;

        assert!(sink.find("Member/Connections/Active").is_none());
        assert!(sink.find("Database/app/Table/users/Operations/Read").is_some());
    }

    #[tokio::test]
    async fn empty_cluster_produces_only_cluster_metrics() {
        let orchestrator = Orchestrator::new(config_for_host("localhost"));
        let mut source = populated_source();
        source.members = Vec::new();
        let mut sink = RecordingSink::default();

        orchestrator.collect_all(&mut source, &mut sink).await;

        assert_eq!(sink.assertions.len(), 5);
    }
}

//! # RethinkDB Stats Gatherer - Main Entry Point
//!
//! This tool polls a RethinkDB cluster for operational statistics by:
//!
//! 1. Connecting to the configured server once per poll interval
//! 2. Resolving which cluster member it is attached to
//! 3. Gathering cluster-, member- and table-scoped statistics
//! 4. Displaying the resulting metrics in a terminal table
//! 5. Optionally exporting the cycle as JSON or POSTing it to a monitoring endpoint

use clap::Parser;
use color_eyre::Result;
use rethinkdb_stats_gatherer::{
    Config,
    Orchestrator,
    ReportSink,
};
use tracing::{
    error,
    info,
    warn,
};

#[derive(Parser)]
#[command(name = "rethinkdb-stats-gatherer")]
#[command(about = "RethinkDB Cluster Statistics Gatherer")]
#[command(version)]
struct Cli {
    /// RethinkDB host to connect to; also matched against the cluster members' canonical
    /// addresses to identify the local member
    #[arg(long, env = "RETHINKDB_HOST", default_value = "localhost")]
    host: String,

    /// RethinkDB driver port
    #[arg(long, env = "RETHINKDB_PORT", default_value_t = 28015)]
    port: u16,

    /// Driver auth key; authentication is disabled when unset or empty
    #[arg(long, env = "RETHINKDB_AUTH_KEY")]
    auth_key: Option<String>,

    /// Poll interval (e.g. "60s", "5m")
    #[arg(long, default_value = "60s")]
    poll_interval: String,

    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,

    /// Output file path (optional, if provided the JSON summary of each cycle is written
    /// there)
    #[arg(long)]
    output_file: Option<String>,

    /// HTTP endpoint to POST each cycle's JSON summary to (optional)
    #[arg(long)]
    publish_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("rethinkdb_stats_gatherer={log_level}"))
        .init();

    color_eyre::install()?;

    let poll_interval = humantime::parse_duration(&cli.poll_interval)
        .map_err(|e| eyre::eyre!("Invalid poll interval '{}': {}", cli.poll_interval, e))?;

    let config = Config::new(
        cli.host,
        cli.port,
        cli.auth_key,
        poll_interval,
        cli.output_file,
        cli.publish_url,
    );

    info!("Starting RethinkDB Stats Gatherer");
    info!("Server: {}", config.addr());
    info!("Poll interval: {:?}", config.poll_interval);
    if config.auth_key.is_some() {
        info!("Authentication: enabled");
    }

    let orchestrator = Orchestrator::new(config.clone());
    let mut sink = ReportSink::new();
    let http_client = reqwest::Client::new();

    let mut ticker = tokio::time::interval(config.poll_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match orchestrator.run_cycle(&mut sink).await {
            Ok(()) => {
                println!("{}", sink.format());

                if let Some(output_file) = &config.output_file {
                    let json_string = serde_json::to_string_pretty(&sink.summary())?;
                    tokio::fs::write(output_file, json_string).await?;
                    info!("Cycle exported to {}", output_file);
                }

                if let Some(publish_url) = &config.publish_url {
                    if let Err(err) = sink.publish(&http_client, publish_url).await {
                        warn!(error = %err, "failed to publish cycle summary");
                    }
                }
            }
            Err(err) => {
                // The next poll cycle is the retry.
                error!(error = %err, "poll cycle failed");
            }
        }

        if cli.once {
            break;
        }
    }

    Ok(())
}

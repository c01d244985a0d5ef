//! Agency Phone Sync - Main entry point
//!
//! Parses the command line, loads configuration, runs the selected sync mode,
//! writes the export file, and prints a run summary to stdout.

use agency_phone_sync::services::BatchFetcher;
use agency_phone_sync::{
    export_entries, AgencyClient, AsyncAgencyClient, AsyncAgencyClientImpl, ClientId, Config,
    Metrics, PhoneSyncService, SyncMode, SyncReport,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::{CommandFactory, Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Days covered by an incremental sync when `--since` is not given.
const DEFAULT_INCREMENTAL_DAYS: i64 = 7;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Export client phone numbers from the agency API to JSON or CSV."
)]
struct Cli {
    /// Which clients to sync.
    #[arg(long, value_enum, ignore_case = true, default_value_t = Mode::Full)]
    mode: Mode,

    /// Start of the change window for incremental syncs (YYYY-MM-DD or RFC 3339).
    /// Defaults to seven days ago.
    #[arg(long, value_parser = parse_since)]
    since: Option<DateTime<Utc>>,

    /// Client number to sync in single-client mode.
    #[arg(long)]
    client: Option<ClientId>,

    /// Output file. A `.csv` extension writes CSV, anything else JSON.
    #[arg(long, default_value = "phone_numbers.json")]
    output: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Full,
    Incremental,
    #[value(alias = "singleclient")]
    SingleClient,
}

fn parse_since(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got: {}", value))
}

impl Cli {
    /// Resolve the sync mode, or `None` when a required argument is missing.
    fn sync_mode(&self) -> Option<SyncMode> {
        match self.mode {
            Mode::Full => Some(SyncMode::Full),
            Mode::Incremental => Some(SyncMode::Incremental {
                since: self
                    .since
                    .unwrap_or_else(|| Utc::now() - Duration::days(DEFAULT_INCREMENTAL_DAYS)),
            }),
            Mode::SingleClient => self.client.map(SyncMode::SingleClient),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(mode) = cli.sync_mode() else {
        eprintln!("--client <ID> is required for single-client mode\n");
        Cli::command().print_help()?;
        return Ok(());
    };

    // Pick up LOG_LEVEL from .env before the subscriber is built
    let _ = dotenvy::dotenv();
    let default_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Syncing agency {} from {}",
        config.agency_id, config.api_base_url
    );

    let metrics = Metrics::new();
    let sync_client = AgencyClient::new(&config).with_metrics(metrics.clone());
    let client = Arc::new(AsyncAgencyClientImpl::new(sync_client)) as Arc<dyn AsyncAgencyClient>;

    let fetcher = BatchFetcher::new(client)
        .with_batch_size(config.batch_size)
        .with_batch_delay(config.batch_delay())
        .with_item_timeout(config.request_timeout())
        .with_metrics(metrics.clone());
    let service = PhoneSyncService::new(fetcher);

    let report = service
        .run(mode)
        .await
        .with_context(|| format!("{} sync failed", mode))?;

    let (_, written) = export_entries(&report.entries, &cli.output)
        .with_context(|| format!("Failed to export to {}", cli.output.display()))?;

    print_summary(&report, &written, &metrics);
    Ok(())
}

fn print_summary(report: &SyncReport, output: &Path, metrics: &Metrics) {
    let http = metrics.summary();

    println!("Sync complete: {}", report.mode);
    println!("  Clients requested:  {}", report.client_ids_requested);
    println!("  Records fetched:    {}", report.records_fetched);
    println!("  Not found:          {}", report.not_found.len());
    println!("  Failed:             {}", report.failures.len());
    println!("  Phone numbers:      {}", report.entries.len());
    println!("  Output:             {}", output.display());
    println!(
        "  HTTP requests:      {} ({} errors, avg {:.0} ms)",
        http.http_requests_total, http.http_errors_total, http.http_duration_avg_ms
    );
    println!("  Elapsed:            {:.1}s", report.elapsed.as_secs_f64());
}

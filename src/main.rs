//! Fleet HOS - Hours-of-Service compliance for fleet drivers.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use fleet_hos as app;
use sea_orm::DatabaseConnection;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use app::config::{AppConfig, ConfigLoadResult, LoggingConfig};
use app::db;
use app::export;
use app::hos::{DriverHosStatus, DutyLog, calculate_hos_status};
use app::models::CreateDutyLog;
use app::service::HosService;

/// Hours-of-Service compliance for fleet drivers.
#[derive(Parser)]
#[command(name = "fleet-hos", version)]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long, global = true)]
    dev: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate duty logs from a JSON file without touching the database
    Check {
        /// JSON array of duty logs
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long, default_value = "driver")]
        driver: String,
        /// Evaluation time (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    #[command(flatten)]
    Database(DbCommand),
}

/// Commands that need a database connection.
#[derive(Subcommand)]
enum DbCommand {
    /// Compute one driver's status from stored logs
    Status {
        #[arg(short, long)]
        driver: String,
        /// Evaluation time (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        /// Show the last persisted snapshot instead of recomputing
        #[arg(long, conflicts_with = "now")]
        stored: bool,
    },
    /// Recompute and persist snapshots for every active driver
    Refresh {
        #[arg(short, long)]
        org: String,
    },
    /// List stored snapshots for an organization
    Summary {
        #[arg(short, long)]
        org: String,
    },
    /// Write an Excel report of current fleet status
    Export {
        #[arg(short, long)]
        org: String,
        /// Output file (defaults to a timestamped name in the export directory)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Export one row per violation instead of one row per driver
        #[arg(long)]
        violations: bool,
    },
    /// Validate and store a daily duty log from a JSON file
    Import {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Delete duty logs dated before a given day
    Purge {
        #[arg(long)]
        before: NaiveDate,
    },
    /// Show row counts of the HOS tables
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    let load_result = AppConfig::try_load(&config_path);

    let logging = match &load_result {
        ConfigLoadResult::Loaded(config) => config.logging.clone(),
        _ => LoggingConfig::default(),
    };
    let _guard = init_logging(&logging);

    tracing::info!("Fleet HOS starting...");
    if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
    }
    tracing::info!("Config path: {:?}", config_path);

    match cli.command {
        Command::Check { input, driver, now } => run_check(&input, &driver, now),
        Command::InitConfig { force } => init_config(&config_path, force),
        Command::Database(command) => {
            let config = require_config(load_result, &config_path)?;
            run_with_database(config, command).await
        }
    }
}

/// Initialize stderr logging plus an optional daily rolling file.
fn init_logging(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(logging.level.to_lowercase()));
    let stderr = fmt::layer().with_writer(std::io::stderr);

    if logging.directory.trim().is_empty() {
        tracing_subscriber::registry().with(filter).with(stderr).init();
        return None;
    }

    let appender = tracing_appender::rolling::daily(&logging.directory, "fleet-hos.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    Some(guard)
}

fn require_config(load_result: ConfigLoadResult, path: &Path) -> anyhow::Result<AppConfig> {
    match load_result {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            Ok(config)
        }
        ConfigLoadResult::Missing => {
            bail!("Config file {path:?} not found; run `fleet-hos init-config` first")
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            Err(e).with_context(|| format!("Invalid config file {path:?}"))
        }
    }
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("Config file {path:?} already exists (use --force to overwrite)");
    }
    AppConfig::default().save(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// Evaluate a JSON file of duty logs offline.
fn run_check(input: &Path, driver: &str, now: Option<DateTime<Utc>>) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let logs: Vec<DutyLog> =
        serde_json::from_str(&content).with_context(|| format!("Invalid duty logs in {}", input.display()))?;

    let now = now.unwrap_or_else(Utc::now);
    let status = calculate_hos_status(driver, &logs, now);
    print_status(&status)
}

async fn run_with_database(config: AppConfig, command: DbCommand) -> anyhow::Result<()> {
    let conn = connect(&config).await?;
    let service = HosService::new(config.clone(), conn.clone());

    match command {
        DbCommand::Status { driver, now, stored } => {
            let status = if stored {
                let model = db::hos_status::get_by_driver(&conn, &driver)
                    .await?
                    .with_context(|| format!("No stored snapshot for driver {driver}"))?;
                DriverHosStatus::try_from(model)?
            } else {
                match now {
                    Some(now) => service.driver_status_at(&driver, now).await?,
                    None => service.driver_status(&driver).await?,
                }
            };
            print_status(&status)?;
        }
        DbCommand::Refresh { org } => {
            let result = service.refresh_snapshots(&org).await?;
            println!("{}", result.summary());
        }
        DbCommand::Summary { org } => {
            let rows = db::hos_status::list_for_organization(&conn, &org).await?;
            for row in &rows {
                let computed = row
                    .computed_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<12} {:<28} {:<14} {:>6} {:<10} {}",
                    row.driver_id,
                    row.full_name(),
                    row.current_status.as_deref().unwrap_or("-"),
                    row.available_drive_time.map(|m| m.to_string()).unwrap_or_default(),
                    row.compliance_label(),
                    computed
                );
            }
            println!("{} driver(s)", rows.len());
        }
        DbCommand::Export { org, output, violations } => {
            let rows = service.fleet_statuses(&org, Utc::now()).await?;
            let prefix = if violations { "hos_violations" } else { "hos_status" };
            let path = output.unwrap_or_else(|| config.export.resolve(&export::generate_export_filename(prefix)));

            if violations {
                let written = export::export_violations_to_excel(&rows, &path)?;
                println!("Exported {written} violation(s) to {}", path.display());
            } else {
                export::export_hos_statuses_to_excel(&rows, &path)?;
                println!("Exported {} driver(s) to {}", rows.len(), path.display());
            }
        }
        DbCommand::Import { input } => {
            let content =
                std::fs::read_to_string(&input).with_context(|| format!("Failed to read {}", input.display()))?;
            let log: CreateDutyLog = serde_json::from_str(&content)?;
            let owner = service.record_log(&log).await?;
            println!(
                "Stored {} entries for {} on {}",
                log.logs.len(),
                owner.full_name(),
                log.log_date
            );
        }
        DbCommand::Purge { before } => {
            let deleted = service.purge_before(before).await?;
            println!("Deleted {deleted} duty log(s)");
        }
        DbCommand::Stats => {
            let counts = db::get_table_counts(&conn).await?;
            println!("{counts}");
        }
    }

    Ok(())
}

async fn connect(config: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    let conn = db::connect(&config.database.connection_string())
        .await
        .context("Failed to connect to database")?;
    db::test_connection(&conn).await.context("Database did not respond")?;

    // Log connection info
    if let Ok(version) = db::get_version(&conn).await {
        tracing::info!("PostgreSQL: {}", version);
    }

    if let Ok(counts) = db::get_table_counts(&conn).await {
        tracing::info!("Tables: {}", counts);
    }

    Ok(conn)
}

fn print_status(status: &DriverHosStatus) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(status)?);
    Ok(())
}

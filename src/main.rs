use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use asset_hours::availability::{
    Availability, AvailabilitySnapshot, ClassAvailability, available_by_class, query,
};
use asset_hours::catalog::{ScheduleCatalog, config};
use asset_hours::clock::{Clock, FixedClock, SystemClock};
use asset_hours::feed::AvailabilityFeed;
use asset_hours::types::asset_class::AssetClass;
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use dotenvy::dotenv;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "asset-hours", about = "Which instruments are tradable right now")]
struct Args {
    #[arg(long, default_value = config::DEFAULT_FILE_NAME)]
    pub catalog: PathBuf,

    /// Evaluate at this RFC 3339 instant instead of the system clock.
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,

    /// Query a single instrument id.
    #[arg(long, conflicts_with_all = ["watch", "summary"])]
    pub instrument: Option<String>,

    /// Only list instruments of this asset class.
    #[arg(long)]
    pub class: Option<AssetClass>,

    /// Print open/total counts per asset class.
    #[arg(long, conflicts_with = "watch")]
    pub summary: bool,

    /// Keep re-evaluating until Ctrl-C.
    #[arg(long)]
    pub watch: bool,

    #[arg(long, default_value_t = AvailabilityFeed::DEFAULT_PERIOD.as_secs())]
    pub interval_secs: u64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("asset_hours=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let catalog = Arc::new(config::from_file(&args.catalog)?);

    let clock: Arc<dyn Clock> = match args.at {
        Some(at) => Arc::new(FixedClock(at)),
        None => Arc::new(SystemClock),
    };

    if let Some(id) = &args.instrument {
        return print_query(&catalog, id, clock.now(), args.format);
    }

    if args.summary {
        return print_summary(&available_by_class(&catalog, clock.now()), args.format);
    }

    if args.watch {
        if args.at.is_some() {
            warn!("--at pins the clock; every refresh will report the same instant");
        }
        return watch(catalog, clock, &args).await;
    }

    let snapshot = AvailabilitySnapshot::capture(&catalog, clock.now());
    print_snapshot(&filter_class(&catalog, snapshot, args.class), args.format)
}

async fn watch(catalog: Arc<ScheduleCatalog>, clock: Arc<dyn Clock>, args: &Args) -> Result<()> {
    if args.interval_secs == 0 {
        bail!("--interval-secs must be > 0");
    }

    let feed = AvailabilityFeed::spawn(
        catalog.clone(),
        clock,
        Duration::from_secs(args.interval_secs),
    )?;
    let mut receiver = feed.subscribe();

    print_snapshot(
        &filter_class(&catalog, receiver.borrow_and_update().clone(), args.class),
        args.format,
    )?;

    loop {
        tokio::select! {
            changed = receiver.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = receiver.borrow_and_update().clone();
                print_snapshot(&filter_class(&catalog, snapshot, args.class), args.format)?;
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for ctrl-c")?;
                info!("interrupted");
                break;
            }
        }
    }

    feed.shutdown().await
}

fn filter_class(
    catalog: &ScheduleCatalog,
    mut snapshot: AvailabilitySnapshot,
    class: Option<AssetClass>,
) -> AvailabilitySnapshot {
    if let Some(class) = class {
        snapshot.available.retain(|id| {
            catalog
                .get(id)
                .is_some_and(|instrument| instrument.class() == Some(class))
        });
    }
    snapshot
}

fn print_snapshot(snapshot: &AvailabilitySnapshot, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(snapshot)?),
        OutputFormat::Text if snapshot.is_empty() => {
            println!("{} no instruments available", snapshot.at.to_rfc3339());
        }
        OutputFormat::Text => {
            println!("{} {} available", snapshot.at.to_rfc3339(), snapshot.available.len());
            for id in &snapshot.available {
                println!("  {id}");
            }
        }
    }
    Ok(())
}

fn print_query(
    catalog: &ScheduleCatalog,
    id: &str,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<()> {
    let status = match query(catalog, id, now) {
        Availability::Open => "open",
        Availability::Closed => "closed",
        Availability::NotFound => "not found",
    };

    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "instrument": id, "at": now, "status": status })
        ),
        OutputFormat::Text => println!("{id}: {status}"),
    }
    Ok(())
}

fn print_summary(summary: &[ClassAvailability], format: OutputFormat) -> Result<()> {
    let label = |class: Option<AssetClass>| {
        class.map_or_else(|| "unclassified".to_string(), |class| class.to_string())
    };

    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = summary
                .iter()
                .map(|entry| {
                    json!({
                        "class": label(entry.class),
                        "open": entry.open,
                        "total": entry.total,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string(&rows)?);
        }
        OutputFormat::Text => {
            for entry in summary {
                println!("{:<14} {:>3}/{:<3}", label(entry.class), entry.open, entry.total);
            }
        }
    }
    Ok(())
}

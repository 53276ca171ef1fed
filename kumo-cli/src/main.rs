//! Kumo CLI — Ichimoku Cloud signal watcher.
//!
//! Commands:
//! - `run` — one watcher invocation: fetch the daily series, evaluate the
//!   signal, notify on a newly fired signal, publish the dashboard snapshot.
//!   Intended to be triggered by cron or an equivalent scheduler.
//! - `history` — print the recorded signal events from the ledger.

use anyhow::Result;
use clap::{Parser, Subcommand};
use kumo_core::data::StooqProvider;
use kumo_core::ledger::{JsonFileLedger, SignalLedger};
use kumo_runner::runner::{run_once, RunOutcome, MIN_BARS};
use kumo_runner::{Config, EmailNotifier, Notifier};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kumo", about = "Ichimoku Cloud signal watcher")]
struct Cli {
    /// Path to a TOML config file. Environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the latest daily series, evaluate, notify, publish.
    Run {
        /// Ticker override (defaults to the configured ticker, GLD).
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Print the recorded signal events.
    History,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { ticker } => {
            if let Some(ticker) = ticker {
                config.ticker = ticker;
            }
            run_cmd(&config)
        }
        Commands::History => history_cmd(&config),
    }
}

fn run_cmd(config: &Config) -> Result<()> {
    let provider = StooqProvider::new();
    let mut ledger = JsonFileLedger::open(&config.ledger_path)?;

    let email = match (&config.smtp, config.recipients.is_empty()) {
        (Some(smtp), false) => Some(EmailNotifier::from_config(smtp)?),
        _ => None,
    };
    let notifier = email.as_ref().map(|n| n as &dyn Notifier);

    match run_once(config, &provider, &mut ledger, notifier)? {
        RunOutcome::Published { signal, notified } => {
            println!(
                "{}: {} ({})",
                config.ticker,
                signal,
                if notified { "new signal, alerts sent" } else { "no new alert" }
            );
        }
        RunOutcome::InsufficientHistory { bars } => {
            println!(
                "{}: not enough history ({bars} bars, need {MIN_BARS}) — skipped",
                config.ticker
            );
        }
    }

    Ok(())
}

fn history_cmd(config: &Config) -> Result<()> {
    let ledger = JsonFileLedger::open(&config.ledger_path)?;
    let mut events = ledger.events()?;
    events.sort_by_key(|e| (e.date, e.kind));

    if events.is_empty() {
        println!("No signal events recorded.");
        return Ok(());
    }

    for event in events {
        println!("{}  {}", event.date, event.kind);
    }
    Ok(())
}

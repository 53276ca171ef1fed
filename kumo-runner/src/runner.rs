//! One watcher invocation: fetch → compute → evaluate → dedup/notify → publish.
//!
//! Ordering is load-bearing. When a new signal fires, the alert goes out
//! first and the ledger entry is recorded second: a crash between the two
//! duplicates at most one notification on the next run, whereas the reverse
//! order could drop one silently. The snapshot publish always comes last and
//! always happens — the dashboard must reflect the latest price even when no
//! new signal fired.

use crate::config::Config;
use crate::notify::{alert_html, alert_subject, alert_text, Notifier};
use crate::publish::publish_snapshot;
use anyhow::{Context, Result};
use kumo_core::data::PriceProvider;
use kumo_core::domain::Bar;
use kumo_core::ledger::SignalLedger;
use kumo_core::signal::{evaluate, Signal};
use kumo_core::{indicators, snapshot};

/// Minimum bar count for a run to proceed. Comfortably above the calculator
/// warmup so the latest index always carries a full tuple.
pub const MIN_BARS: usize = 80;

/// How a completed (non-failed) run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Snapshot published. `notified` is true when a new signal fired this
    /// run (alerts attempted and the ledger entry recorded).
    Published { signal: Signal, notified: bool },

    /// Too little history to evaluate; logged and skipped, nothing mutated.
    InsufficientHistory { bars: usize },
}

pub fn run_once(
    config: &Config,
    provider: &dyn PriceProvider,
    ledger: &mut dyn SignalLedger,
    notifier: Option<&dyn Notifier>,
) -> Result<RunOutcome> {
    let bars = provider
        .fetch(&config.ticker)
        .with_context(|| format!("fetching daily series for {}", config.ticker))?;

    if bars.len() < MIN_BARS {
        tracing::warn!(
            ticker = %config.ticker,
            bars = bars.len(),
            required = MIN_BARS,
            "insufficient history, skipping run"
        );
        return Ok(RunOutcome::InsufficientHistory { bars: bars.len() });
    }

    let latest_index = bars.len() - 1;
    let latest = bars[latest_index];
    let point = indicators::compute(&bars, latest_index)
        .expect("history floor guarantees a computable latest index");
    let signal = evaluate(latest.close, &point);

    let mut notified = false;
    if let Some(kind) = signal.kind() {
        let already_fired = ledger
            .has_fired(kind, latest.date)
            .context("querying signal ledger")?;

        if already_fired {
            tracing::debug!(%signal, date = %latest.date, "signal already fired, not re-notifying");
        } else {
            send_alerts(config, notifier, signal, &latest);
            ledger
                .record_fired(kind, latest.date)
                .context("recording fired signal in ledger")?;
            notified = true;
        }
    }

    let events = ledger.events().context("listing signal history")?;
    let snap = snapshot::build(&config.ticker, &bars, &point, signal, events);
    publish_snapshot(&snap, &config.snapshot_path)?;

    tracing::info!(
        ticker = %config.ticker,
        price = latest.close,
        %signal,
        notified,
        "run complete"
    );

    Ok(RunOutcome::Published { signal, notified })
}

/// Attempt delivery to every recipient independently; failures are logged
/// and never short-circuit the loop or the run.
fn send_alerts(config: &Config, notifier: Option<&dyn Notifier>, signal: Signal, latest: &Bar) {
    let Some(notifier) = notifier else {
        tracing::info!(%signal, "no notification channel configured, skipping alerts");
        return;
    };

    let subject = alert_subject(signal, &config.ticker);
    let text = alert_text(signal, &config.ticker, latest.close, latest.date);
    let html = alert_html(signal, &config.ticker, latest.close, latest.date);

    for recipient in &config.recipients {
        match notifier.notify(recipient, &subject, &text, &html) {
            Ok(()) => tracing::info!(%recipient, "alert sent"),
            Err(err) => tracing::warn!(%recipient, error = %err, "alert delivery failed"),
        }
    }
}

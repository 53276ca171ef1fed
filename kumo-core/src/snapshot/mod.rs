//! Dashboard snapshot — the published view of the latest run.
//!
//! Rebuilt fully on every run; there is no incremental update. The wire
//! format is camelCase JSON with `null` for indicator values that predate
//! the warmup — never zero, which the dashboard could not tell apart from a
//! real price level.

use crate::domain::Bar;
use crate::indicators::{self, IchimokuPoint};
use crate::signal::{Signal, SignalEvent};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of trailing bars included in the snapshot history window.
pub const HISTORY_WINDOW: usize = 40;

/// The published snapshot document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub ticker: String,
    pub price: f64,
    pub date: NaiveDate,
    pub signal: Signal,
    pub signal_history: Vec<SignalEvent>,
    pub ichimoku: IchimokuView,
    pub history: Vec<HistoryRow>,
}

/// The latest Ichimoku tuple, field-renamed for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IchimokuView {
    pub tenkan: f64,
    pub kijun: f64,
    pub senkou_a: f64,
    pub senkou_b: f64,
}

impl From<&IchimokuPoint> for IchimokuView {
    fn from(point: &IchimokuPoint) -> Self {
        Self {
            tenkan: point.tenkan,
            kijun: point.kijun,
            senkou_a: point.span_a,
            senkou_b: point.span_b,
        }
    }
}

/// One trailing-window day: the bar plus its own indicator tuple.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub tenkan: Option<f64>,
    pub kijun: Option<f64>,
    pub span_a: Option<f64>,
    pub span_b: Option<f64>,
}

/// Assemble the snapshot for the latest run.
///
/// The trailing window is a display slice only: each row's indicators are
/// recomputed at the row's own absolute index with the entire preceding
/// series as lookback context.
///
/// # Panics
///
/// Panics on an empty series — the orchestrator's history floor guarantees
/// bars long before this point.
pub fn build(
    ticker: &str,
    series: &[Bar],
    latest: &IchimokuPoint,
    signal: Signal,
    signal_history: Vec<SignalEvent>,
) -> Snapshot {
    let last = series.last().expect("snapshot requires a non-empty series");

    let start = series.len().saturating_sub(HISTORY_WINDOW);
    let history = (start..series.len())
        .map(|i| {
            let bar = &series[i];
            let point = indicators::compute(series, i);
            HistoryRow {
                date: bar.date,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                tenkan: point.map(|p| p.tenkan),
                kijun: point.map(|p| p.kijun),
                span_a: point.map(|p| p.span_a),
                span_b: point.map(|p| p.span_b),
            }
        })
        .collect();

    Snapshot {
        ticker: ticker.to_string(),
        price: last.close,
        date: last.date,
        signal,
        signal_history,
        ichimoku: latest.into(),
        history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SignalKind;
    use std::collections::BTreeSet;

    fn flat_bars(n: usize, price: f64) -> Vec<Bar> {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        (0..n)
            .map(|i| Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: price,
                high: price,
                low: price,
                close: price,
            })
            .collect()
    }

    fn build_flat(n: usize) -> Snapshot {
        let bars = flat_bars(n, 100.0);
        let latest = indicators::compute(&bars, n - 1).unwrap();
        build("GLD", &bars, &latest, Signal::Neutral, Vec::new())
    }

    #[test]
    fn window_is_last_forty_bars() {
        let snapshot = build_flat(120);
        assert_eq!(snapshot.history.len(), HISTORY_WINDOW);

        let bars = flat_bars(120, 100.0);
        assert_eq!(snapshot.history[0].date, bars[80].date);
        assert_eq!(snapshot.history.last().unwrap().date, bars[119].date);
    }

    #[test]
    fn latest_price_and_date_come_from_last_bar() {
        let snapshot = build_flat(90);
        let bars = flat_bars(90, 100.0);
        assert_eq!(snapshot.price, 100.0);
        assert_eq!(snapshot.date, bars[89].date);
    }

    #[test]
    fn pre_warmup_rows_have_absent_indicators() {
        // 80 bars: window covers indices 40..=79; indices below 61 predate
        // the warmup and must serialize as null, not zero.
        let snapshot = build_flat(80);
        assert_eq!(snapshot.history.len(), HISTORY_WINDOW);

        let row_at = |abs: usize| &snapshot.history[abs - 40];
        assert!(row_at(60).tenkan.is_none());
        assert!(row_at(60).span_b.is_none());
        assert!(row_at(61).tenkan.is_some());
        assert!(row_at(79).span_b.is_some());
    }

    #[test]
    fn null_indicators_serialize_as_null() {
        let snapshot = build_flat(80);
        let json = serde_json::to_value(&snapshot).unwrap();
        let first = &json["history"][0];
        assert!(first["tenkan"].is_null());
        assert!(first["spanA"].is_null());
        assert!(!first["open"].is_null());
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let snapshot = build_flat(80);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("signalHistory").is_some());
        assert!(json["ichimoku"].get("senkouA").is_some());
        assert!(json["ichimoku"].get("senkouB").is_some());
        let last = &json["history"][39];
        assert!(last.get("spanA").is_some());
        assert!(last.get("spanB").is_some());
    }

    #[test]
    fn signal_history_roundtrips_ledger_events() {
        let events = vec![
            SignalEvent {
                kind: SignalKind::Buy,
                date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            },
            SignalEvent {
                kind: SignalKind::Sell,
                date: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
            },
        ];

        let bars = flat_bars(80, 100.0);
        let latest = indicators::compute(&bars, 79).unwrap();
        let snapshot = build("GLD", &bars, &latest, Signal::Neutral, events.clone());

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();

        let expected: BTreeSet<_> = events.iter().map(|e| (e.kind, e.date)).collect();
        let actual: BTreeSet<_> = back.signal_history.iter().map(|e| (e.kind, e.date)).collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn short_series_window_is_whole_series() {
        let bars = flat_bars(70, 100.0);
        let latest = indicators::compute(&bars, 69).unwrap();
        let snapshot = build("GLD", &bars, &latest, Signal::Neutral, Vec::new());
        assert_eq!(snapshot.history.len(), 40);

        let bars = flat_bars(30, 100.0);
        // No computable latest point below the warmup; feed a synthetic one —
        // the builder itself has no minimum-length requirement beyond
        // non-emptiness.
        let latest = IchimokuPoint {
            tenkan: 100.0,
            kijun: 100.0,
            span_a: 100.0,
            span_b: 100.0,
        };
        let snapshot = build("GLD", &bars, &latest, Signal::Neutral, Vec::new());
        assert_eq!(snapshot.history.len(), 30);
        assert!(snapshot.history.iter().all(|r| r.tenkan.is_none()));
    }
}

//! Ichimoku Cloud calculator.
//!
//! Classic 9/26/52 parameters with a 26-bar displacement, fixed rather than
//! configurable. Only the four components the signal engine compares are
//! produced (no Chikou span).
//!
//! Span A and Span B are anchored backward: where conventional charting plots
//! the cloud 26 bars ahead, this calculator reads the same values 26 bars
//! back, so `compute(series, i)` returns the cloud edges already aligned with
//! bar `i`'s close. Signal evaluation compares today's price directly against
//! the returned spans.

use crate::domain::Bar;

/// Tenkan-sen (conversion line) window.
pub const TENKAN_PERIOD: usize = 9;
/// Kijun-sen (base line) window.
pub const KIJUN_PERIOD: usize = 26;
/// Senkou Span B lookback window.
pub const SENKOU_B_PERIOD: usize = 52;
/// Cloud displacement applied to both spans.
pub const DISPLACEMENT: usize = 26;

/// First index with enough lead-in history for a full tuple.
pub const MIN_INDEX: usize = TENKAN_PERIOD + SENKOU_B_PERIOD;

/// The four Ichimoku components at one series index.
///
/// Only produced when the index clears [`MIN_INDEX`]; an absent point means
/// "not yet computable", which callers must never collapse to zero — zero is
/// a plausible price level and would silently corrupt signal evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IchimokuPoint {
    pub tenkan: f64,
    pub kijun: f64,
    pub span_a: f64,
    pub span_b: f64,
}

/// Highest-high / lowest-low midpoint over a closed bar window.
fn midpoint(bars: &[Bar]) -> f64 {
    let mut high = f64::NEG_INFINITY;
    let mut low = f64::INFINITY;
    for bar in bars {
        if bar.high > high {
            high = bar.high;
        }
        if bar.low < low {
            low = bar.low;
        }
    }
    (high + low) / 2.0
}

/// Midpoint of the `period`-bar window ending at `end` (inclusive).
/// The window start saturates at the series head.
fn rolling_midpoint(series: &[Bar], end: usize, period: usize) -> f64 {
    let start = (end + 1).saturating_sub(period);
    midpoint(&series[start..=end])
}

/// Compute the Ichimoku tuple at `index`, or `None` when the index lacks
/// lead-in history (`index < MIN_INDEX`).
///
/// Pure and re-entrant: identical inputs always produce identical outputs.
/// All arithmetic stays in `f64`; rounding is a display concern.
///
/// # Panics
///
/// Panics when `index` is outside the series — calling the calculator with
/// an out-of-range index is a programming error, not a runtime condition.
pub fn compute(series: &[Bar], index: usize) -> Option<IchimokuPoint> {
    assert!(
        index < series.len(),
        "ichimoku index {index} out of range for {} bars",
        series.len()
    );
    if index < MIN_INDEX {
        return None;
    }

    let tenkan = rolling_midpoint(series, index, TENKAN_PERIOD);
    let kijun = rolling_midpoint(series, index, KIJUN_PERIOD);

    // Both spans read the displaced anchor 26 bars back instead of plotting
    // forward; `anchor >= 35` whenever `index >= MIN_INDEX`, so the tenkan
    // and kijun windows at the anchor are always fully populated.
    let anchor = index - DISPLACEMENT;
    let span_a = (rolling_midpoint(series, anchor, TENKAN_PERIOD)
        + rolling_midpoint(series, anchor, KIJUN_PERIOD))
        / 2.0;

    // 52-bar lookback ending just past the anchor. The window start saturates
    // at the series head so the whole tuple is defined from MIN_INDEX onward;
    // from index 77 the window carries its full depth.
    let span_b_end = index + 1 - DISPLACEMENT;
    let span_b_start = (index + 1).saturating_sub(DISPLACEMENT + SENKOU_B_PERIOD);
    let span_b = midpoint(&series[span_b_start..=span_b_end]);

    Some(IchimokuPoint {
        tenkan,
        kijun,
        span_a,
        span_b,
    })
}

//! Bar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLC bar for a single trading day.
///
/// Bars live only for the duration of one watcher run; nothing persists them
/// across invocations. The usual `low <= open/close <= high` shape is an
/// assumption about the provider, not an enforced invariant — the calculator
/// only ever takes highs from `high` and lows from `low`, so a misshapen bar
/// skews a midpoint but cannot crash the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    /// All four prices are positive finite numbers.
    ///
    /// Rows failing this are dropped during parsing rather than propagated;
    /// a NaN that slipped into a rolling window would poison every midpoint
    /// that includes it.
    pub fn is_well_formed(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite() && *p > 0.0)
    }
}

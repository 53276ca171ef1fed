//! Price provider trait and structured error types.
//!
//! The PriceProvider trait abstracts over the market data source so the
//! orchestrator can be exercised against mocks and the HTTP adapter can be
//! swapped without touching the signal engine.

use crate::domain::Bar;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors from a data fetch. Every variant is fatal for the run: the watcher
/// either computes on a complete, ordered series or not at all.
#[derive(Debug, Error)]
pub enum DataError {
    /// Transport failure or non-2xx response.
    #[error("data unavailable: {0}")]
    Unavailable(String),

    /// The response body yielded no usable bars.
    #[error("response not parseable: {0}")]
    Malformed(String),

    /// Ascending-date safety check failed. Window arithmetic in the
    /// calculator is only correct on a strictly ascending series, so a
    /// misordered feed must stop the run rather than be silently re-sorted.
    #[error("series not strictly ascending at {0}")]
    OutOfOrder(NaiveDate),
}

/// Trait for daily-series providers.
pub trait PriceProvider {
    /// Fetch the full daily OHLC history for a ticker, oldest bar first.
    fn fetch(&self, ticker: &str) -> Result<Vec<Bar>, DataError>;
}

/// Verify the series is strictly ascending by date (which also rules out
/// duplicate dates).
pub fn ensure_ascending(bars: &[Bar]) -> Result<(), DataError> {
    for pair in bars.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(DataError::OutOfOrder(pair[1].date));
        }
    }
    Ok(())
}

//! Stooq daily-series provider.
//!
//! Fetches the full daily history as CSV (`Date,Open,High,Low,Close,Volume`,
//! oldest row first) from Stooq's download endpoint. Rows with unparseable
//! or non-positive numeric fields are dropped, not fatal; a completely
//! unusable body is. No automatic retries — a failed run is simply retried
//! by the next scheduler trigger.

use super::provider::{ensure_ascending, DataError, PriceProvider};
use crate::domain::Bar;
use chrono::NaiveDate;
use std::time::Duration;

pub struct StooqProvider {
    client: reqwest::blocking::Client,
}

impl StooqProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("kumo/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Map a ticker to Stooq's symbol namespace: lowercase, with bare US
    /// tickers getting the `.us` suffix (`GLD` → `gld.us`). Tickers that
    /// already carry a market suffix pass through unchanged.
    fn stooq_symbol(ticker: &str) -> String {
        let ticker = ticker.to_ascii_lowercase();
        if ticker.contains('.') {
            ticker
        } else {
            format!("{ticker}.us")
        }
    }

    fn series_url(symbol: &str) -> String {
        format!("https://stooq.com/q/d/l/?s={symbol}&i=d")
    }
}

impl Default for StooqProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceProvider for StooqProvider {
    fn fetch(&self, ticker: &str) -> Result<Vec<Bar>, DataError> {
        let url = Self::series_url(&Self::stooq_symbol(ticker));

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::Unavailable(format!("HTTP {status} for {ticker}")));
        }

        let body = resp
            .text()
            .map_err(|e| DataError::Unavailable(e.to_string()))?;

        parse_daily_csv(&body)
    }
}

/// Parse a daily CSV body into an ascending bar series.
///
/// Individual rows failing numeric parsing are dropped (the count is logged,
/// since dropping a day shifts every rolling window that spanned it). Source
/// ordering is trusted but verified — we never re-sort.
pub fn parse_daily_csv(body: &str) -> Result<Vec<Bar>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut bars = Vec::new();
    let mut dropped = 0usize;

    for record in reader.records() {
        let record = record.map_err(|e| DataError::Malformed(e.to_string()))?;
        match parse_row(&record) {
            Some(bar) => bars.push(bar),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, "dropped rows with unparseable fields");
    }

    if bars.is_empty() {
        return Err(DataError::Malformed("no parseable data rows".into()));
    }

    ensure_ascending(&bars)?;
    Ok(bars)
}

fn parse_row(record: &csv::StringRecord) -> Option<Bar> {
    let date = NaiveDate::parse_from_str(record.get(0)?, "%Y-%m-%d").ok()?;
    let price = |i: usize| -> Option<f64> { record.get(i)?.trim().parse::<f64>().ok() };

    let bar = Bar {
        date,
        open: price(1)?,
        high: price(2)?,
        low: price(3)?,
        close: price(4)?,
    };
    bar.is_well_formed().then_some(bar)
}

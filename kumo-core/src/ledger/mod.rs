//! Signal dedup ledger — append-only record of which (signal, day) pairs
//! have already triggered a notification.
//!
//! The ledger is a durable map from a composite key to "has fired". It grows
//! monotonically; entries are never removed. The orchestrator reads it once
//! per run for the dedup decision and writes at most once.

mod json_file;
mod memory;

pub use json_file::JsonFileLedger;
pub use memory::MemoryLedger;

use crate::signal::{SignalEvent, SignalKind};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors from the durable store behind a ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger store is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Port for the dedup ledger. Implementations must make `record_fired`
/// idempotent: re-recording an existing key is a silent no-op.
pub trait SignalLedger {
    /// Has this (kind, day) pair already triggered a notification?
    fn has_fired(&self, kind: SignalKind, date: NaiveDate) -> Result<bool, LedgerError>;

    /// Record that the pair fired. Idempotent.
    fn record_fired(&mut self, kind: SignalKind, date: NaiveDate) -> Result<(), LedgerError>;

    /// All recorded events, for dashboard display. Order carries no meaning.
    fn events(&self) -> Result<Vec<SignalEvent>, LedgerError>;
}

const KEY_DELIMITER: char = ':';

/// Encode a (kind, day) pair as the composite store key, e.g. `BUY:2024-03-08`.
pub fn encode_key(kind: SignalKind, date: NaiveDate) -> String {
    format!("{}{}{}", kind.as_str(), KEY_DELIMITER, date.format("%Y-%m-%d"))
}

/// Decode a composite key back into an event.
///
/// Splits at the FIRST delimiter only: the kind token can never contain the
/// delimiter, while a date rendering might, so everything after the first
/// `:` belongs to the date.
pub fn parse_key(key: &str) -> Option<SignalEvent> {
    let (kind, date) = key.split_once(KEY_DELIMITER)?;
    let kind = kind.parse().ok()?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(SignalEvent { kind, date })
}

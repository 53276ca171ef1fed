//! In-process ledger for tests and dry runs.

use super::{encode_key, parse_key, LedgerError, SignalLedger};
use crate::signal::{SignalEvent, SignalKind};
use chrono::NaiveDate;
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct MemoryLedger {
    keys: BTreeSet<String>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SignalLedger for MemoryLedger {
    fn has_fired(&self, kind: SignalKind, date: NaiveDate) -> Result<bool, LedgerError> {
        Ok(self.keys.contains(&encode_key(kind, date)))
    }

    fn record_fired(&mut self, kind: SignalKind, date: NaiveDate) -> Result<(), LedgerError> {
        self.keys.insert(encode_key(kind, date));
        Ok(())
    }

    fn events(&self) -> Result<Vec<SignalEvent>, LedgerError> {
        Ok(self.keys.iter().filter_map(|k| parse_key(k)).collect())
    }
}

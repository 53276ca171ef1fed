//! File-backed ledger: one JSON object mapping composite keys to `true`.
//!
//! The file is read fully at open and rewritten fully on every change — the
//! map stays tiny (one entry per signal-day, ever), so a partial-update
//! format buys nothing.

use super::{encode_key, parse_key, LedgerError, SignalLedger};
use crate::signal::{SignalEvent, SignalKind};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct JsonFileLedger {
    path: PathBuf,
    entries: BTreeMap<String, bool>,
}

impl JsonFileLedger {
    /// Open the ledger at `path`. A missing file is an empty ledger; a file
    /// that exists but fails to parse is corrupt and fatal.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SignalLedger for JsonFileLedger {
    fn has_fired(&self, kind: SignalKind, date: NaiveDate) -> Result<bool, LedgerError> {
        Ok(self.entries.contains_key(&encode_key(kind, date)))
    }

    fn record_fired(&mut self, kind: SignalKind, date: NaiveDate) -> Result<(), LedgerError> {
        let key = encode_key(kind, date);
        if self.entries.insert(key, true).is_none() {
            self.persist()?;
        }
        Ok(())
    }

    fn events(&self) -> Result<Vec<SignalEvent>, LedgerError> {
        let mut events = Vec::with_capacity(self.entries.len());
        for key in self.entries.keys() {
            match parse_key(key) {
                Some(event) => events.push(event),
                None => tracing::warn!(key = %key, "skipping unrecognized ledger key"),
            }
        }
        Ok(events)
    }
}

//! Snapshot publishing — atomic JSON file replace.
//!
//! The dashboard reads the snapshot path at arbitrary times, so the file is
//! written to a sibling temp file and renamed over the target. A failed run
//! leaves the previous snapshot intact as last-known-good; a torn write is
//! never observable.

use anyhow::{Context, Result};
use kumo_core::snapshot::Snapshot;
use std::fs;
use std::path::Path;

pub fn publish_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("serializing snapshot")?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating snapshot directory {}", parent.display()))?;
        }
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)
        .with_context(|| format!("writing snapshot temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("replacing snapshot at {}", path.display()))?;
    Ok(())
}

//! Kumo Core — Ichimoku signal engine for a single daily price series.
//!
//! This crate contains the heart of the watcher:
//! - Domain types (daily OHLC bars)
//! - Ichimoku Cloud calculator (fixed 9/26/52 parameters, 26-bar displacement)
//! - Price-vs-cloud signal evaluation
//! - Append-only signal dedup ledger (port + file/memory stores)
//! - Price data provider (port + Stooq HTTP adapter)
//! - Dashboard snapshot builder
//!
//! Orchestration, configuration, and the notification channel live in
//! `kumo-runner`; this crate stays pure enough to test without I/O.

pub mod data;
pub mod domain;
pub mod indicators;
pub mod ledger;
pub mod signal;
pub mod snapshot;

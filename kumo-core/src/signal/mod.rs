//! Trading signal derivation and the recordable signal event type.

use crate::indicators::IchimokuPoint;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The current signal state. Neutral is the default "no signal" state and is
/// never recorded as history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

impl Signal {
    /// The recordable kind, if any. Neutral never touches the ledger.
    pub fn kind(&self) -> Option<SignalKind> {
        match self {
            Signal::Buy => Some(SignalKind::Buy),
            Signal::Sell => Some(SignalKind::Sell),
            Signal::Neutral => None,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// The subset of signals worth remembering: a directional call on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    Buy,
    Sell,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Buy => "BUY",
            SignalKind::Sell => "SELL",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(SignalKind::Buy),
            "SELL" => Ok(SignalKind::Sell),
            _ => Err(()),
        }
    }
}

/// A directional signal that fired on a calendar day. At most one event per
/// (kind, day) pair ever exists — the ledger enforces that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalEvent {
    #[serde(rename = "type")]
    pub kind: SignalKind,
    pub date: NaiveDate,
}

/// Classify the latest price against the cloud.
///
/// Buy requires the conversion line above the base line AND price clear of
/// the *wider* cloud edge — exiting the cloud, not merely crossing one edge.
/// Sell is symmetric: conversion below base AND price under both edges.
/// A tenkan/kijun tie is always Neutral, regardless of price.
pub fn evaluate(price: f64, point: &IchimokuPoint) -> Signal {
    let upper = point.span_a.max(point.span_b);
    let lower = point.span_a.min(point.span_b);

    if point.tenkan > point.kijun && price > upper {
        Signal::Buy
    } else if point.tenkan < point.kijun && price < lower {
        Signal::Sell
    } else {
        Signal::Neutral
    }
}

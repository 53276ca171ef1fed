//! Indicator calculators.
//!
//! Indicators are pure functions: bar history in, values out. No shared
//! mutable state, so they can be recomputed for every index of a display
//! window without caching.

pub mod ichimoku;

pub use ichimoku::{compute, IchimokuPoint};

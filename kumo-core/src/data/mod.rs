//! Price data acquisition.

pub mod provider;
pub mod stooq;

pub use provider::{DataError, PriceProvider};
pub use stooq::StooqProvider;

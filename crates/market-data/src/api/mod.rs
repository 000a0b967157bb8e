//! Market data provider implementations

pub mod yahoo;

pub use yahoo::YahooProvider;

//! Shared utilities for live-market-data
//!
//! This crate provides the logging setup and process-level configuration used
//! by the server binary.

pub mod config;
pub mod logging;

pub use config::{Config, LogFormat};
pub use logging::init_tracing;

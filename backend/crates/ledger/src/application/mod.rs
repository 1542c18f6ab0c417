//! Application Layer

pub mod config;

pub use config::{LedgerConfig, LedgerMode};

//! Configuration management for cachebust
//!
//! This crate provides the transform options and the logging setup shared by
//! every host that runs the pass.

pub mod config;
pub mod logging;

// Re-export commonly used types at the crate root for convenience
pub use config::{BustConfig, LogFormat, LoggingConfig, MAX_HASH_LENGTH};

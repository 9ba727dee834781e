//! Infrastructure layer module
//!
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//!
//! Adapters for the domain ports live in `crate::adapters`.

pub mod config;
pub mod logging;

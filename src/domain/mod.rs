//! Domain layer for projectsmith
//!
//! This module contains the core data model, errors and port traits.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{CapabilityError, DomainError, DomainResult};

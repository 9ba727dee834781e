//! Adapters for external systems.

pub mod ids;
pub mod sink;
pub mod substrates;

pub use ids::{SequentialIdGenerator, TimestampIdGenerator};
pub use sink::DirectorySink;

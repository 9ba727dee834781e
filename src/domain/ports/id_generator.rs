//! Identifier generator port.

/// Source of unique identifiers for tasks and synthesized file names.
///
/// Injected so that task creation is deterministic under test.
pub trait IdGenerator: Send + Sync {
    /// Produce the next identifier. Never returns the same value twice.
    fn next_id(&self) -> String;
}

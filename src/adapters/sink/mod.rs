//! Project sink implementations.

pub mod directory;

pub use directory::DirectorySink;

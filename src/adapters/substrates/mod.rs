//! Text generator adapter implementations.

pub mod anthropic_api;
pub mod mock;
pub mod registry;

pub use anthropic_api::{AnthropicApiConfig, AnthropicTextGenerator};
pub use mock::{MockResponse, MockTextGenerator};
pub use registry::GeneratorRegistry;

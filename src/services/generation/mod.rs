//! Code generation for technical tasks.
//!
//! The orchestrator holds one [`GenerationStrategy`]:
//!
//! - [`RemoteStrategy`]: prompt the text generator, extract fenced files,
//!   enhance them.
//! - [`TemplateStrategy`]: hand-authored file sets per topic.
//! - [`FallbackStrategy`]: a primary strategy whose capability failures are
//!   replaced by the template output.
//!
//! [`build_strategy`] picks one from the configured [`GenerationMode`].
//!
//! [`GenerationMode`]: crate::domain::models::GenerationMode

mod fallback;
mod orchestrator;
pub mod prompt;
mod remote;
mod strategy;
mod template;
pub mod templates;

pub use fallback::FallbackStrategy;
pub use orchestrator::GenerationOrchestrator;
pub use prompt::build_prompt;
pub use remote::RemoteStrategy;
pub use strategy::{build_strategy, GenerationOutput, GenerationStrategy};
pub use template::TemplateStrategy;
pub use templates::Topic;

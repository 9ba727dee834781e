//! Text generator registry and factory.

use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{GenerationConfig, GenerationMode};
use crate::domain::ports::TextGenerator;

use super::anthropic_api::{AnthropicApiConfig, AnthropicTextGenerator};
use super::mock::MockTextGenerator;

/// Registry of available text generators.
pub struct GeneratorRegistry {
    anthropic_api_config: AnthropicApiConfig,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self {
            anthropic_api_config: AnthropicApiConfig::default(),
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            anthropic_api_config: AnthropicApiConfig::from(config),
        }
    }

    pub fn with_anthropic_api_config(mut self, config: AnthropicApiConfig) -> Self {
        self.anthropic_api_config = config;
        self
    }

    /// Create a generator by type name.
    pub fn create(&self, generator_type: &str) -> DomainResult<Option<Arc<dyn TextGenerator>>> {
        match generator_type {
            "anthropic_api" => {
                let generator = AnthropicTextGenerator::new(self.anthropic_api_config.clone())?;
                Ok(Some(Arc::new(generator)))
            }
            "mock" => Ok(Some(Arc::new(MockTextGenerator::new()))),
            _ => Ok(None),
        }
    }

    /// Generator appropriate for a mode; none in fallback-only mode.
    pub fn for_mode(&self, mode: GenerationMode) -> DomainResult<Option<Arc<dyn TextGenerator>>> {
        match mode {
            GenerationMode::Remote => self.create("anthropic_api"),
            GenerationMode::FallbackOnly => Ok(None),
        }
    }

    pub fn available_types(&self) -> Vec<&'static str> {
        vec!["anthropic_api", "mock"]
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_by_type() {
        let registry = GeneratorRegistry::new();

        let api = registry.create("anthropic_api").unwrap().unwrap();
        assert_eq!(api.name(), "anthropic_api");

        let mock = registry.create("mock").unwrap().unwrap();
        assert_eq!(mock.name(), "mock");

        assert!(registry.create("invalid").unwrap().is_none());
    }

    #[test]
    fn test_fallback_only_has_no_generator() {
        let registry = GeneratorRegistry::new();
        assert!(registry.for_mode(GenerationMode::FallbackOnly).unwrap().is_none());
        assert!(registry.for_mode(GenerationMode::Remote).unwrap().is_some());
    }

    #[test]
    fn test_available_types() {
        let types = GeneratorRegistry::new().available_types();
        assert!(types.contains(&"anthropic_api"));
        assert!(types.contains(&"mock"));
    }
}

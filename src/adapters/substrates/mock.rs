//! Mock text generator for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::errors::CapabilityError;
use crate::domain::ports::TextGenerator;

/// Mock response configuration.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this text
    Text(String),
    /// Fail with this error
    Fail(CapabilityError),
    /// Sleep before answering, to exercise timeouts
    Delayed(Duration, String),
}

impl MockResponse {
    pub fn success(output: impl Into<String>) -> Self {
        Self::Text(output.into())
    }

    pub fn failure(error: CapabilityError) -> Self {
        Self::Fail(error)
    }
}

/// Mock text generator.
///
/// Scripted responses are consumed in order; once the script is exhausted
/// the default response is returned for every further call.
pub struct MockTextGenerator {
    default_response: MockResponse,
    script: Mutex<VecDeque<MockResponse>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self::with_default_response(MockResponse::success("No code blocks in this response."))
    }

    pub fn with_default_response(response: MockResponse) -> Self {
        Self {
            default_response: response,
            script: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a response for the next unanswered call.
    pub fn push_response(&self, response: MockResponse) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(response);
        }
    }

    /// Number of `complete` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn next_response(&self) -> MockResponse {
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| self.default_response.clone())
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn complete(&self, prompt: &str) -> Result<String, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match self.next_response() {
            MockResponse::Text(text) => Ok(text),
            MockResponse::Fail(err) => Err(err),
            MockResponse::Delayed(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
        }
    }
}

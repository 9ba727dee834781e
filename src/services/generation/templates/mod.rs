//! Hand-authored file sets used when no remote generation is available.
//!
//! A task is mapped to one topic by keyword, title first. Each topic has a
//! fixed frontend and backend file set; tasks that match no topic get a
//! small generic scaffold named after the task title.

mod backend;
mod frontend;

use crate::domain::models::{AgentKind, GeneratedFile, TechnicalTask};
use crate::services::code_enhancer::stem_words;

/// Feature area a template set covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Authentication,
    TaskManagement,
    Collaboration,
    Data,
    Api,
    Generic,
}

/// Keyword table in match order. The first topic with a hit wins.
const TOPIC_KEYWORDS: [(Topic, &[&str]); 5] = [
    (Topic::Authentication, &["auth", "login", "user", "sign in", "signup"]),
    (Topic::TaskManagement, &["task", "todo"]),
    (Topic::Collaboration, &["sharing", "share", "collaborat"]),
    (Topic::Data, &["database", "schema", "data"]),
    (Topic::Api, &["api", "rest", "graphql", "endpoint"]),
];

const TITLE_STOP_WORDS: [&str; 16] = [
    "a", "an", "and", "the", "for", "with", "build", "implement", "design", "create", "develop",
    "add", "ui", "api", "interface", "service",
];

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::TaskManagement => "task_management",
            Self::Collaboration => "collaboration",
            Self::Data => "data",
            Self::Api => "api",
            Self::Generic => "generic",
        }
    }

    /// Topic for a task, checking the title before the description.
    pub fn for_task(task: &TechnicalTask) -> Self {
        Self::match_text(&task.title)
            .or_else(|| Self::match_text(&task.description))
            .unwrap_or(Self::Generic)
    }

    fn match_text(text: &str) -> Option<Self> {
        let lowered = text.to_lowercase();
        TOPIC_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(topic, _)| *topic)
    }
}

/// Names derived from a task title, used by the generic scaffolds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureName {
    words: Vec<String>,
}

impl FeatureName {
    pub fn from_title(title: &str) -> Self {
        let mut words: Vec<String> = stem_words(title)
            .into_iter()
            .filter(|w| !TITLE_STOP_WORDS.contains(&w.as_str()))
            .collect();
        if words.first().is_some_and(|w| w.starts_with(|c: char| c.is_ascii_digit())) {
            words.insert(0, "feature".to_string());
        }
        if words.is_empty() {
            words.push("feature".to_string());
        }
        Self { words }
    }

    /// `ProfilePage`
    pub fn pascal(&self) -> String {
        self.words.iter().map(|w| capitalize(w)).collect()
    }

    /// `profilePage`
    pub fn camel(&self) -> String {
        let pascal = self.pascal();
        let mut chars = pascal.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_ascii_lowercase().to_string() + chars.as_str()
        })
    }

    /// `profile-page`
    pub fn kebab(&self) -> String {
        self.words.join("-")
    }

    /// `profile page`
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    })
}

/// The template file set for a task on the given side.
pub fn files_for(task: &TechnicalTask, agent: AgentKind) -> Vec<GeneratedFile> {
    let topic = Topic::for_task(task);
    let name = FeatureName::from_title(&task.title);
    tracing::debug!(task_id = %task.id, topic = topic.as_str(), agent = agent.as_str(), "selected template set");

    match agent {
        AgentKind::Frontend => frontend::files(topic, &name),
        AgentKind::Backend => backend::files(topic, &name),
    }
}

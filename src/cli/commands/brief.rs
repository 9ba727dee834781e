//! Brief input shared by the brief-consuming commands.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::domain::models::ProjectBrief;

#[derive(Args, Debug, Default)]
pub struct BriefArgs {
    /// What the project should do
    #[arg(required_unless_present = "brief_file")]
    pub description: Option<String>,

    /// Functional requirement (repeatable)
    #[arg(short, long)]
    pub requirement: Vec<String>,

    /// Constraint such as stack or hosting (repeatable)
    #[arg(long)]
    pub constraint: Vec<String>,

    /// Delivery timeline
    #[arg(long)]
    pub timeline: Option<String>,

    /// Read the brief from a JSON or YAML file
    #[arg(long, value_name = "FILE")]
    pub brief_file: Option<PathBuf>,
}

impl BriefArgs {
    /// Build the brief. A positional description overrides the file's and
    /// flag lists extend it.
    pub fn into_brief(self) -> Result<ProjectBrief> {
        let mut brief = match &self.brief_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read brief file {}", path.display()))?;
                ProjectBrief::from_document(&raw)
                    .with_context(|| format!("Invalid brief file {}", path.display()))?
            }
            None => ProjectBrief::new(String::new()),
        };

        if let Some(description) = self.description {
            brief.description = description;
        }
        brief.requirements.extend(self.requirement);
        brief.constraints.extend(self.constraint);
        if self.timeline.is_some() {
            brief.timeline = self.timeline;
        }

        brief.validate().context("Invalid brief")?;
        Ok(brief)
    }
}

//! Implementation of the `projectsmith generate` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use super::brief::BriefArgs;
use crate::adapters::{DirectorySink, TimestampIdGenerator};
use crate::cli::output::{create_spinner, output, CommandOutput, ProgressBarExt, TableFormatter};
use crate::domain::models::{Config, GenerationMode, GenerationSummary, PathCollision, TaskResult};
use crate::domain::ports::ProjectSink;
use crate::services::project_assembler::project_slug;
use crate::services::ProjectPipeline;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub brief: BriefArgs,

    /// Project name (derived from the description when omitted)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output directory (default: <output.directory>/<project-name>)
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Use templates only, never the text generator
    #[arg(long)]
    pub fallback_only: bool,

    /// Assemble and list files without writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    pub project: String,
    pub strategy: String,
    pub output_dir: Option<PathBuf>,
    pub files: Vec<String>,
    pub summary: GenerationSummary,
    pub results: Vec<TaskResult>,
    pub collisions: Vec<PathCollision>,
}

impl CommandOutput for GenerateOutput {
    fn to_human(&self) -> String {
        let formatter = TableFormatter::new();
        let mut lines = vec![
            format!("Project: {} (strategy: {})", self.project, self.strategy),
            formatter.format_results(&self.results),
            format!(
                "{} of {} task(s) succeeded, {} file(s) generated",
                self.summary.succeeded, self.summary.total_tasks, self.summary.files_generated
            ),
        ];

        if !self.collisions.is_empty() {
            lines.push(format!("\n{} path collision(s) renamed:", self.collisions.len()));
            lines.push(formatter.format_collisions(&self.collisions));
        }

        match &self.output_dir {
            Some(dir) => {
                lines.push(format!("\nWrote {} file(s) to {}", self.files.len(), dir.display()));
                if self.files.iter().any(|f| f == "START.sh") {
                    lines.push(format!("Run: cd {} && ./START.sh", dir.display()));
                }
            }
            None => {
                lines.push(format!("\nDry run, {} file(s) not written:", self.files.len()));
                lines.extend(self.files.iter().map(|f| format!("  {f}")));
            }
        }
        lines.join("\n")
    }
}

/// Short project name from the first meaningful words of a description.
pub fn default_project_name(description: &str) -> String {
    const LEADING: [&str; 9] = ["build", "create", "make", "write", "generate", "a", "an", "the", "me"];
    const BREAKS: [&str; 7] = ["with", "and", "for", "that", "which", "where", "using"];

    let words: Vec<String> = description
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
        .skip_while(|w| LEADING.contains(&w.as_str()))
        .take_while(|w| !BREAKS.contains(&w.as_str()))
        .take(4)
        .collect();
    project_slug(&words.join(" "))
}

pub async fn execute(args: GenerateArgs, config: Config, json_mode: bool) -> Result<()> {
    let mut generation_config = config.generation.clone();
    if args.fallback_only {
        generation_config.mode = GenerationMode::FallbackOnly;
    }

    let brief = args.brief.into_brief()?;
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| default_project_name(&brief.description));

    let pipeline = ProjectPipeline::from_config(&generation_config, Arc::new(TimestampIdGenerator::new()))
        .await
        .context("Failed to set up generation")?;

    let spinner = create_spinner(json_mode);
    spinner.set_message(format!("Generating {name} ({})", pipeline.strategy_name()));
    let generation = match pipeline.generate_project(&brief).await {
        Ok(generation) => generation,
        Err(err) => {
            spinner.finish_error("Generation failed");
            return Err(err).context("Failed to generate project");
        }
    };
    if generation.summary.all_succeeded() {
        spinner.finish_success(format!("Generated {} file(s)", generation.summary.files_generated));
    } else {
        spinner.finish_warning(format!("{} task(s) failed", generation.summary.failed));
    }

    let project = pipeline
        .assemble(&generation, &name, &brief.description)
        .context("Failed to assemble project")?;

    let output_dir = if args.dry_run {
        None
    } else {
        let root = args
            .out
            .clone()
            .unwrap_or_else(|| config.output.directory.join(&project.name));
        let report = DirectorySink::new(&root)
            .write(&project)
            .with_context(|| format!("Failed to write project to {}", root.display()))?;
        Some(report.root)
    };

    let out = GenerateOutput {
        project: project.name.clone(),
        strategy: pipeline.strategy_name().to_string(),
        output_dir,
        files: project.paths().map(ToString::to_string).collect(),
        summary: generation.summary,
        results: generation.results,
        collisions: project.collisions,
    };
    output(&out, json_mode);
    Ok(())
}

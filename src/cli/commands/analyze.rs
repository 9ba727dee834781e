//! Implementation of the `projectsmith analyze` command.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;

use super::brief::BriefArgs;
use crate::adapters::TimestampIdGenerator;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::TechnicalTask;
use crate::services::generation::TemplateStrategy;
use crate::services::ProjectPipeline;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub brief: BriefArgs,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOutput {
    pub description: String,
    pub tasks: Vec<TechnicalTask>,
    pub execution_plan: String,
}

impl CommandOutput for AnalyzeOutput {
    fn to_human(&self) -> String {
        if self.tasks.is_empty() {
            return "No tasks recognized in the brief. Mention features such as authentication, \
                    tasks, sharing, an API or a database."
                .to_string();
        }

        let mut lines = vec![
            format!("Found {} task(s):", self.tasks.len()),
            TableFormatter::new().format_tasks(&self.tasks),
            String::new(),
        ];
        lines.push(self.execution_plan.trim_end().to_string());
        lines.join("\n")
    }
}

pub fn execute(args: AnalyzeArgs, json_mode: bool) -> Result<()> {
    let brief = args.brief.into_brief()?;

    // analysis never generates code, so the strategy is irrelevant
    let pipeline = ProjectPipeline::new(
        Arc::new(TimestampIdGenerator::new()),
        Arc::new(TemplateStrategy::new()),
    );
    let analysis = pipeline.analyze(&brief)?;

    let out = AnalyzeOutput {
        description: brief.description,
        tasks: analysis.tasks,
        execution_plan: analysis.execution_plan,
    };
    output(&out, json_mode);
    Ok(())
}

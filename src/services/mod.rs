pub mod code_enhancer;
pub mod execution_plan;
pub mod generation;
pub mod pipeline;
pub mod project_assembler;
pub mod response_extractor;
pub mod task_breakdown;

pub use code_enhancer::CodeEnhancer;
pub use execution_plan::{ExecutionPlan, ExecutionPlanner};
pub use generation::{GenerationOrchestrator, GenerationStrategy};
pub use pipeline::{BriefAnalysis, ProjectGeneration, ProjectPipeline};
pub use project_assembler::ProjectAssembler;
pub use response_extractor::ResponseExtractor;
pub use task_breakdown::TaskBreakdownEngine;

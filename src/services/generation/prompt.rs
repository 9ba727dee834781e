//! Prompt construction for remote generation.

use std::fmt::Write as _;

use crate::domain::models::{AgentKind, TechnicalTask};

const FRONTEND_ROLE: &str = "You are a senior frontend engineer building a React application with TypeScript and Vite.";
const BACKEND_ROLE: &str = "You are a senior backend engineer building a Node.js REST API with Express and TypeScript.";

const FRONTEND_GUIDELINES: &str = "\
- Write function components with hooks and typed props interfaces.
- Keep API calls in small client modules under src/api/ and handle loading and error states.
- Label every form control for screen readers and keep layouts responsive.
- Put styles in plain CSS files under src/styles/.";

const BACKEND_GUIDELINES: &str = "\
- Put handlers in src/controllers/, routers in src/routes/, data access in src/models/.
- Every router module must `export default router`.
- Validate request bodies and answer with JSON errors and correct status codes.
- Read secrets and connection strings from process.env.
- Provide SQL migrations under migrations/ for every table you need.";

const OUTPUT_FORMAT: &str = "\
Return complete, production-quality, idiomatic and fully typed code. Do not \
leave placeholders. Put every file in its own fenced code block whose first \
line names the file, exactly like this:

```typescript
// File: src/path/to/file.ts
<code>
```

Use paths relative to the project root of this side of the application.";

/// Build the generation prompt for a task.
pub fn build_prompt(task: &TechnicalTask, agent: AgentKind) -> String {
    let (role, guidelines) = match agent {
        AgentKind::Frontend => (FRONTEND_ROLE, FRONTEND_GUIDELINES),
        AgentKind::Backend => (BACKEND_ROLE, BACKEND_GUIDELINES),
    };

    let mut prompt = String::new();
    let _ = writeln!(prompt, "{role}\n");
    let _ = writeln!(prompt, "Task: {}", task.title);
    let _ = writeln!(prompt, "Description: {}", task.description);

    if !task.acceptance_criteria.is_empty() {
        prompt.push_str("\nAcceptance criteria:\n");
        for (i, criterion) in task.acceptance_criteria.iter().enumerate() {
            let _ = writeln!(prompt, "{}. {criterion}", i + 1);
        }
    }

    let _ = writeln!(prompt, "\nGuidelines:\n{guidelines}");
    let _ = writeln!(prompt, "\n{OUTPUT_FORMAT}");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TaskKind;

    #[test]
    fn test_prompt_enumerates_criteria() {
        let task = TechnicalTask::new("t", "Build Authentication UI", "Login and register forms", TaskKind::Frontend)
            .with_acceptance_criteria(vec!["Form validates".into(), "Errors are shown".into()]);
        let prompt = build_prompt(&task, AgentKind::Frontend);

        assert!(prompt.starts_with(FRONTEND_ROLE));
        assert!(prompt.contains("Task: Build Authentication UI"));
        assert!(prompt.contains("1. Form validates\n2. Errors are shown\n"));
        assert!(prompt.contains("// File: src/path/to/file.ts"));
    }

    #[test]
    fn test_backend_guidelines() {
        let task = TechnicalTask::new("t", "Implement Task API", "CRUD", TaskKind::Backend);
        let prompt = build_prompt(&task, AgentKind::Backend);
        assert!(prompt.contains("export default router"));
        assert!(!prompt.contains("Acceptance criteria"));
    }
}

//! Rule-based decomposition of a brief into technical tasks.
//!
//! The description is matched against an ordered table of topic rules.
//! Every rule whose keywords occur in the lower-cased description appends
//! its task templates; rules are independent and non-exclusive. Matching is
//! plain substring search, so "no database needed" still yields the schema
//! task: a spurious task only costs unused files, a missed one silently
//! drops required work.

use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ProjectBrief, TaskKind, TaskPriority, TechnicalTask};
use crate::domain::ports::IdGenerator;

/// Prewritten task produced when a topic matches.
#[derive(Debug, Clone, Copy)]
pub struct TaskTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub kind: TemplateKind,
    pub priority: TaskPriority,
    pub estimated_hours: f32,
    pub acceptance_criteria: &'static [&'static str],
}

/// Task kinds a template can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Frontend,
    Backend,
}

impl From<TemplateKind> for TaskKind {
    fn from(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Frontend => Self::Frontend,
            TemplateKind::Backend => Self::Backend,
        }
    }
}

/// A topic: keywords that trigger it and the tasks it contributes.
#[derive(Debug, Clone, Copy)]
pub struct TopicRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub tasks: &'static [TaskTemplate],
}

impl TopicRule {
    /// True when any keyword occurs in the (already lower-cased) text.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

const AUTH_TASKS: &[TaskTemplate] = &[
    TaskTemplate {
        title: "Implement User Authentication API",
        description: "Create secure registration, login and logout endpoints with hashed \
                      passwords, JWT issuance and middleware that protects private routes.",
        kind: TemplateKind::Backend,
        priority: TaskPriority::High,
        estimated_hours: 8.0,
        acceptance_criteria: &[
            "Users can register with email and password",
            "Passwords are hashed before they are stored",
            "Login returns a signed JWT for valid credentials",
            "Protected routes reject requests without a valid token",
            "Invalid credentials return a 401 with a clear message",
        ],
    },
    TaskTemplate {
        title: "Build Authentication UI",
        description: "Create login and registration forms with client-side validation, \
                      error feedback and session handling in the client.",
        kind: TemplateKind::Frontend,
        priority: TaskPriority::High,
        estimated_hours: 6.0,
        acceptance_criteria: &[
            "Login form validates email and password before submitting",
            "Registration form confirms the password",
            "Server errors are shown next to the form",
            "The session token is kept and cleared on logout",
            "Forms are keyboard and screen-reader accessible",
        ],
    },
];

const TASK_MANAGEMENT_TASKS: &[TaskTemplate] = &[
    TaskTemplate {
        title: "Implement Task Management API",
        description: "Create CRUD endpoints for tasks with ownership checks, status \
                      transitions, due dates and filtering.",
        kind: TemplateKind::Backend,
        priority: TaskPriority::High,
        estimated_hours: 10.0,
        acceptance_criteria: &[
            "Tasks can be created, read, updated and deleted",
            "Users only see and modify their own tasks",
            "Tasks can be filtered by status",
            "Input is validated and errors return 400",
            "Task data persists in the database",
        ],
    },
    TaskTemplate {
        title: "Build Task Management Interface",
        description: "Create task list, task item and task form components that let a \
                      user add, complete, edit and delete tasks.",
        kind: TemplateKind::Frontend,
        priority: TaskPriority::High,
        estimated_hours: 8.0,
        acceptance_criteria: &[
            "Tasks are listed with title, status and due date",
            "New tasks can be added from a form",
            "Tasks can be marked complete and deleted",
            "Loading and error states are visible",
            "The layout works on mobile screens",
        ],
    },
];

const COLLABORATION_TASKS: &[TaskTemplate] = &[
    TaskTemplate {
        title: "Implement Sharing & Collaboration Service",
        description: "Create endpoints to share resources with other users, manage \
                      permissions and list what has been shared with a user.",
        kind: TemplateKind::Backend,
        priority: TaskPriority::Medium,
        estimated_hours: 8.0,
        acceptance_criteria: &[
            "A resource can be shared with another user by email",
            "Shares carry view or edit permission",
            "Shares can be revoked by the owner",
            "Users can list resources shared with them",
        ],
    },
    TaskTemplate {
        title: "Build Sharing & Collaboration UI",
        description: "Create a share dialog and shared-items view so users can invite \
                      collaborators and see who has access.",
        kind: TemplateKind::Frontend,
        priority: TaskPriority::Medium,
        estimated_hours: 6.0,
        acceptance_criteria: &[
            "Share dialog accepts an email and a permission level",
            "Current collaborators are listed with their permission",
            "Access can be revoked from the dialog",
        ],
    },
];

const API_TASKS: &[TaskTemplate] = &[TaskTemplate {
    title: "Design REST API Layer",
    description: "Define consistent REST conventions, request validation, error \
                  handling middleware and a health endpoint for the service.",
    kind: TemplateKind::Backend,
    priority: TaskPriority::Medium,
    estimated_hours: 5.0,
    acceptance_criteria: &[
        "Errors use one JSON shape with status and message",
        "Unknown routes return 404",
        "A health endpoint reports service status",
        "Requests are logged",
    ],
}];

const DATA_TASKS: &[TaskTemplate] = &[TaskTemplate {
    title: "Design Database Schema",
    description: "Design the relational schema, a connection pool and ordered SQL \
                  migrations for the application's data.",
    kind: TemplateKind::Backend,
    priority: TaskPriority::High,
    estimated_hours: 4.0,
    acceptance_criteria: &[
        "Tables have primary keys and timestamps",
        "Foreign keys enforce relationships",
        "Migrations apply in order on an empty database",
        "A connection pool is configured from the environment",
    ],
}];

/// Topic rules in scan order.
pub const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        name: "authentication",
        keywords: &["auth", "login", "user"],
        tasks: AUTH_TASKS,
    },
    TopicRule {
        name: "task_management",
        keywords: &["task", "todo", "management"],
        tasks: TASK_MANAGEMENT_TASKS,
    },
    TopicRule {
        name: "collaboration",
        keywords: &["sharing", "collaboration"],
        tasks: COLLABORATION_TASKS,
    },
    TopicRule {
        name: "api",
        keywords: &["api", "rest", "graphql"],
        tasks: API_TASKS,
    },
    TopicRule {
        name: "data",
        keywords: &["database", "data"],
        tasks: DATA_TASKS,
    },
];

/// Turns a brief into an ordered list of technical tasks.
pub struct TaskBreakdownEngine {
    ids: Arc<dyn IdGenerator>,
    rules: &'static [TopicRule],
}

impl TaskBreakdownEngine {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            ids,
            rules: TOPIC_RULES,
        }
    }

    /// Use a custom rule table.
    pub fn with_rules(mut self, rules: &'static [TopicRule]) -> Self {
        self.rules = rules;
        self
    }

    /// Names of the topics the description triggers, in scan order.
    pub fn matched_topics(&self, brief: &ProjectBrief) -> Vec<&'static str> {
        let lowered = brief.description.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.matches(&lowered))
            .map(|rule| rule.name)
            .collect()
    }

    /// Decompose a brief.
    ///
    /// Fails only for a brief without a description. A description that
    /// triggers no topic yields an empty list.
    pub fn breakdown(&self, brief: &ProjectBrief) -> DomainResult<Vec<TechnicalTask>> {
        brief.validate()?;
        let lowered = brief.description.to_lowercase();

        let mut tasks = Vec::new();
        for rule in self.rules.iter().filter(|rule| rule.matches(&lowered)) {
            let mut backend_id: Option<String> = None;
            for template in rule.tasks {
                let mut task = self.instantiate(template);
                match template.kind {
                    TemplateKind::Backend => backend_id = Some(task.id.clone()),
                    TemplateKind::Frontend => {
                        if let Some(id) = &backend_id {
                            task.dependencies.push(id.clone());
                        }
                    }
                }
                tasks.push(task);
            }
            tracing::debug!(topic = rule.name, tasks = rule.tasks.len(), "topic matched");
        }

        tracing::info!(tasks = tasks.len(), "brief decomposed");
        Ok(tasks)
    }

    fn instantiate(&self, template: &TaskTemplate) -> TechnicalTask {
        TechnicalTask::new(
            self.ids.next_id(),
            template.title,
            template.description,
            template.kind.into(),
        )
        .with_priority(template.priority)
        .with_estimated_hours(template.estimated_hours)
        .with_acceptance_criteria(
            template
                .acceptance_criteria
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
        )
    }
}

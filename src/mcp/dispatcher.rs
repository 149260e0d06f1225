//! Tool dispatcher.
//!
//! Routes `(name, arguments)` to a store action and renders the outcome as
//! human-readable text. Every failure, including store faults, is folded into
//! [`Reply::Failure`] at this boundary so transports always get a well-formed
//! reply.

use std::sync::Arc;

use chrono::Utc;
use miette::Diagnostic;
use rmcp::model::JsonObject;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use super::catalog::{ADD_TASK, Catalog, DELETE_TASK, LIST_TASKS, MARK_TASK_AS_DONE};
use crate::db::{DbError, Task, TaskId, TaskPatch, TaskStore, UpdateOutcome};

/// Maximum number of tasks returned by `list_tasks`.
pub const LIST_LIMIT: usize = 100;

pub const EMPTY_LIST_MESSAGE: &str = "The task list is empty.";

const DONE_GLYPH: &str = "✅";
const PENDING_GLYPH: &str = "⏳";

/// Failures of a single tool call.
#[derive(Error, Diagnostic, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    #[diagnostic(code(todo_mcp::tool::unknown))]
    UnknownTool(String),

    #[error("Missing required argument '{argument}' for tool '{tool}'")]
    #[diagnostic(code(todo_mcp::tool::missing_argument))]
    MissingArgument { tool: String, argument: String },

    #[error("Argument '{argument}' for tool '{tool}' must be a {expected}")]
    #[diagnostic(code(todo_mcp::tool::invalid_argument))]
    InvalidArgument {
        tool: String,
        argument: String,
        expected: &'static str,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] DbError),
}

/// Uniform reply envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Success(String),
    Failure(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Success(text) | Reply::Failure(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Failure(_))
    }
}

/// Stateless router from tool calls to store actions.
///
/// Generic over `S: TaskStore`; the only shared state is the store handle.
pub struct Dispatcher<S: TaskStore> {
    store: Arc<S>,
    catalog: Catalog,
}

impl<S: TaskStore> Dispatcher<S> {
    pub fn new(store: Arc<S>, catalog: Catalog) -> Self {
        Self { store, catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Run a tool call and fold any failure into the reply.
    #[instrument(skip(self, arguments))]
    pub async fn call(&self, name: &str, arguments: Option<&JsonObject>) -> Reply {
        match self.dispatch(name, arguments).await {
            Ok(text) => Reply::Success(text),
            Err(e) => {
                error!(tool = name, error = %e, "Tool call failed");
                Reply::Failure(format!("Error: {}", e))
            }
        }
    }

    /// Validate arguments against the catalog and run the matching action.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<&JsonObject>,
    ) -> Result<String, ToolError> {
        let empty = JsonObject::new();
        let args = arguments.unwrap_or(&empty);

        let tool = self
            .catalog
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tool.validate(args)?;

        match tool.name {
            ADD_TASK => self.add_task(str_arg(args, "title")).await,
            LIST_TASKS => self.list_tasks().await,
            MARK_TASK_AS_DONE => self.mark_task_as_done(str_arg(args, "task_id")).await,
            DELETE_TASK => self.delete_task(str_arg(args, "task_id")).await,
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    async fn add_task(&self, title: &str) -> Result<String, ToolError> {
        let task = Task::validate_create(title)?;
        let id = self.store.insert(task.to_stored()?).await?;

        info!(%id, "Task added");
        Ok(format!("Task added successfully. ID: {}", id))
    }

    async fn list_tasks(&self) -> Result<String, ToolError> {
        let docs = self.store.find_all(LIST_LIMIT).await?;

        let lines: Vec<String> = docs
            .iter()
            .filter_map(|doc| match Task::from_stored(doc) {
                Ok(task) => Some(task),
                Err(e) => {
                    warn!(error = %e, "Skipping corrupt task record");
                    None
                }
            })
            .map(|task| format_task_line(&task))
            .collect();

        if lines.is_empty() {
            return Ok(EMPTY_LIST_MESSAGE.to_string());
        }
        Ok(lines.join("\n"))
    }

    async fn mark_task_as_done(&self, task_id: &str) -> Result<String, ToolError> {
        let id = TaskId::decode(task_id)?;
        let update = TaskPatch::mark_done().to_update(Utc::now())?;

        let message = match self.store.update_by_id(&id, update).await? {
            UpdateOutcome { matched: 0, .. } => not_found(&id),
            UpdateOutcome { modified: 0, .. } => format!("Task {} is already done.", id),
            _ => {
                info!(%id, "Task marked as done");
                format!("Task {} marked as done.", id)
            }
        };
        Ok(message)
    }

    async fn delete_task(&self, task_id: &str) -> Result<String, ToolError> {
        let id = TaskId::decode(task_id)?;

        if self.store.delete_by_id(&id).await? == 0 {
            return Ok(not_found(&id));
        }
        info!(%id, "Task deleted");
        Ok(format!("Task {} deleted successfully.", id))
    }
}

/// Arguments are type-checked before dispatch, so a missing string is empty.
fn str_arg<'a>(args: &'a JsonObject, name: &str) -> &'a str {
    args.get(name).and_then(Value::as_str).unwrap_or_default()
}

fn not_found(id: &TaskId) -> String {
    format!("No task found with ID: {}", id)
}

/// `- [<glyph>] <title> (ID: <id>)`; `in_progress` renders like `todo`.
pub fn format_task_line(task: &Task) -> String {
    let glyph = if task.is_done() {
        DONE_GLYPH
    } else {
        PENDING_GLYPH
    };
    let id = task.id.map(|id| id.encode()).unwrap_or_default();
    format!("- [{}] {} (ID: {})", glyph, task.title, id)
}

//! Tool catalog.
//!
//! The catalog is a fixed, ordered table of [`ToolDescriptor`]s. It is
//! validated once when constructed; afterwards it is read-only and serves
//! both the capability listing and per-call argument checks.

use std::collections::HashSet;
use std::sync::Arc;

use miette::Diagnostic;
use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};
use thiserror::Error;

use super::dispatcher::ToolError;

pub const ADD_TASK: &str = "add_task";
pub const LIST_TASKS: &str = "list_tasks";
pub const MARK_TASK_AS_DONE: &str = "mark_task_as_done";
pub const DELETE_TASK: &str = "delete_task";

/// Primitive argument types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl ArgKind {
    /// JSON Schema type name.
    pub fn schema_type(self) -> &'static str {
        match self {
            ArgKind::String => "string",
            ArgKind::Integer => "integer",
            ArgKind::Number => "number",
            ArgKind::Boolean => "boolean",
        }
    }

    pub fn accepts(self, value: &Value) -> bool {
        match self {
            ArgKind::String => value.is_string(),
            ArgKind::Integer => value.is_i64() || value.is_u64(),
            ArgKind::Number => value.is_number(),
            ArgKind::Boolean => value.is_boolean(),
        }
    }
}

/// One named argument of a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub required: bool,
    pub description: &'static str,
}

impl ArgSpec {
    pub fn required(name: &'static str, kind: ArgKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            description,
        }
    }

    pub fn optional(name: &'static str, kind: ArgKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
        }
    }
}

/// A callable operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub args: Vec<ArgSpec>,
}

impl ToolDescriptor {
    pub fn new(name: &'static str, description: &'static str, args: Vec<ArgSpec>) -> Self {
        Self {
            name,
            description,
            args,
        }
    }

    /// Render the JSON Schema for this tool's arguments.
    pub fn input_schema(&self) -> JsonObject {
        let properties: JsonObject = self
            .args
            .iter()
            .map(|arg| {
                (
                    arg.name.to_string(),
                    json!({
                        "type": arg.kind.schema_type(),
                        "description": arg.description,
                    }),
                )
            })
            .collect();

        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));

        let required: Vec<&str> = self
            .args
            .iter()
            .filter(|arg| arg.required)
            .map(|arg| arg.name)
            .collect();
        if !required.is_empty() {
            schema.insert("required".to_string(), json!(required));
        }

        schema
    }

    /// Check call arguments. Extra arguments are ignored.
    pub fn validate(&self, args: &JsonObject) -> Result<(), ToolError> {
        for spec in &self.args {
            match args.get(spec.name) {
                None | Some(Value::Null) if spec.required => {
                    return Err(ToolError::MissingArgument {
                        tool: self.name.to_string(),
                        argument: spec.name.to_string(),
                    });
                }
                None | Some(Value::Null) => {}
                Some(value) if !spec.kind.accepts(value) => {
                    return Err(ToolError::InvalidArgument {
                        tool: self.name.to_string(),
                        argument: spec.name.to_string(),
                        expected: spec.kind.schema_type(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Convert into the protocol's tool listing entry.
    pub fn to_tool(&self) -> Tool {
        Tool::new(self.name, self.description, Arc::new(self.input_schema()))
    }
}

/// Errors detected while building a catalog.
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Tool name must not be empty")]
    #[diagnostic(code(todo_mcp::catalog::empty_name))]
    EmptyToolName,

    #[error("Duplicate tool name: {0}")]
    #[diagnostic(code(todo_mcp::catalog::duplicate_tool))]
    DuplicateTool(String),

    #[error("Tool '{tool}' has an argument with an empty name")]
    #[diagnostic(code(todo_mcp::catalog::empty_argument))]
    EmptyArgumentName { tool: String },

    #[error("Tool '{tool}' declares argument '{argument}' twice")]
    #[diagnostic(code(todo_mcp::catalog::duplicate_argument))]
    DuplicateArgument { tool: String, argument: String },
}

/// Ordered, validated set of tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tools: Vec<ToolDescriptor>,
}

impl Catalog {
    pub fn new(tools: Vec<ToolDescriptor>) -> Result<Self, CatalogError> {
        let mut names = HashSet::new();
        for tool in &tools {
            if tool.name.is_empty() {
                return Err(CatalogError::EmptyToolName);
            }
            if !names.insert(tool.name) {
                return Err(CatalogError::DuplicateTool(tool.name.to_string()));
            }

            let mut arg_names = HashSet::new();
            for arg in &tool.args {
                if arg.name.is_empty() {
                    return Err(CatalogError::EmptyArgumentName {
                        tool: tool.name.to_string(),
                    });
                }
                if !arg_names.insert(arg.name) {
                    return Err(CatalogError::DuplicateArgument {
                        tool: tool.name.to_string(),
                        argument: arg.name.to_string(),
                    });
                }
            }
        }

        Ok(Self { tools })
    }

    /// The task tools, in listing order.
    pub fn standard() -> Result<Self, CatalogError> {
        let task_id = || {
            ArgSpec::required(
                "task_id",
                ArgKind::String,
                "Task ID (24-character hex string)",
            )
        };

        Self::new(vec![
            ToolDescriptor::new(
                ADD_TASK,
                "Create a new task in the todo list",
                vec![ArgSpec::required(
                    "title",
                    ArgKind::String,
                    "Task title (1-200 characters)",
                )],
            ),
            ToolDescriptor::new(LIST_TASKS, "List all tasks (up to 100)", vec![]),
            ToolDescriptor::new(
                MARK_TASK_AS_DONE,
                "Mark a task as done by its ID",
                vec![task_id()],
            ),
            ToolDescriptor::new(
                DELETE_TASK,
                "Delete a task from the list by its ID",
                vec![task_id()],
            ),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn to_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDescriptor::to_tool).collect()
    }
}

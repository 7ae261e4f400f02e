//! Read-only view of a session for presentation hosts.
//!
//! # Design
//! A `Snapshot` is a self-contained copy: hosts can keep it across intents,
//! serialize it, or hand it over an FFI boundary without borrowing the
//! session. Labels the original form showed are precomputed here so every
//! host renders the same text.

use serde::Serialize;

use crate::types::{Draft, ErrorSet, TodoId, TodoItem};

pub const ADD_LABEL: &str = "Add Todo";
pub const UPDATE_LABEL: &str = "Update Todo";
pub const EMPTY_MESSAGE: &str = "No todos yet. Add some!";

/// Whether a submit will add a new item or update an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Mode {
    Add,
    Update(TodoId),
}

impl Mode {
    pub fn from_target(target: Option<TodoId>) -> Self {
        target.map_or(Mode::Add, Mode::Update)
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Mode::Add => ADD_LABEL,
            Mode::Update(_) => UPDATE_LABEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub items: Vec<TodoItem>,
    pub draft: Draft,
    pub errors: ErrorSet,
    pub mode: Mode,
    pub submit_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

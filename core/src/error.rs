//! Error types for the todo widget.
//!
//! # Design
//! `ValidationError` is the only error the state machine itself produces. It
//! is non-fatal: the caller shows the messages and the user resubmits.
//! `IntentError` covers text coming from a host that does not map onto a
//! `Field` or a `TodoId`; the core never raises it on its own.

use serde::Serialize;
use thiserror::Error;

use crate::types::{ErrorSet, Field};

/// A submit was rejected because one or more fields are blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("validation failed: {}", summary(.errors))]
#[serde(transparent)]
pub struct ValidationError {
    errors: ErrorSet,
}

impl ValidationError {
    pub(crate) fn new(errors: ErrorSet) -> Self {
        Self { errors }
    }

    /// Blank fields, in form order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn message(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }
}

fn summary(errors: &ErrorSet) -> String {
    errors.values().cloned().collect::<Vec<_>>().join(", ")
}

/// Host-supplied text that could not be turned into an intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("invalid todo id: {0}")]
    InvalidId(String),
}

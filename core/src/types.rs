//! Domain values for the todo widget.
//!
//! # Design
//! `TodoId` wraps a `Uuid` so identifiers render the same way at every
//! boundary (serde, C strings, console rows) regardless of which
//! `IdGenerator` produced them. `Draft` is the item-shaped form state; it
//! has no id until the store commits it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{IntentError, ValidationError};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";

/// Opaque identifier of a committed todo item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Id whose UUID encodes `n`; used by `SequentialIds` and by tests.
    pub const fn from_u128(n: u128) -> Self {
        Self(Uuid::from_u128(n))
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TodoId {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| IntentError::InvalidId(s.to_string()))
    }
}

/// A single committed todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Editable form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Description,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Title, Field::Description];

    /// Wire name, as used by hosts in `field_change(name, value)`.
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            Field::Title => TITLE_REQUIRED,
            Field::Description => DESCRIPTION_REQUIRED,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Field::Title),
            "description" => Ok(Field::Description),
            other => Err(IntentError::UnknownField(other.to_string())),
        }
    }
}

/// Field-keyed error messages. Empty means "no errors".
pub type ErrorSet = BTreeMap<Field, String>;

/// In-progress form values, not yet committed to the collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Draft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::Title => self.title = value.into(),
            Field::Description => self.description = value.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && !self.completed
    }

    /// Reject whitespace-only title or description. All blank fields are
    /// reported together.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let errors: ErrorSet = Field::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .map(|field| (field, field.required_message().to_string()))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }
}

impl From<&TodoItem> for Draft {
    fn from(item: &TodoItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            completed: item.completed,
        }
    }
}

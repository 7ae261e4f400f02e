//! State core for an in-memory todo list widget.
//!
//! # Overview
//! Holds the ordered todo collection, the form draft, the editing target and
//! the current validation errors. A presentation host forwards discrete user
//! intents (toggle, begin edit, delete, field change, submit) and redraws
//! from a `Snapshot`; the core never renders anything itself.
//!
//! # Design
//! - `ItemStore` owns the collection and every mutation rule.
//! - `Session` is the interaction controller: explicit state, one method per
//!   intent, validation gating on submit.
//! - Identifiers come from an injected `IdGenerator` so tests are
//!   deterministic.
//! - Types use owned `String` / `Vec` fields so snapshots cross the FFI
//!   boundary without lifetime concerns.

pub mod config;
pub mod error;
pub mod ids;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod types;

pub use config::SessionConfig;
pub use error::{IntentError, ValidationError};
pub use ids::{IdGenerator, IdStrategy, RandomIds, SequentialIds, UnknownIdStrategy};
pub use session::{Dispatched, Intent, Session, SubmitOutcome};
pub use snapshot::{Mode, Snapshot};
pub use store::ItemStore;
pub use types::{Draft, ErrorSet, Field, TodoId, TodoItem};

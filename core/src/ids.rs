//! Identifier generation for committed items.
//!
//! # Design
//! The store asks an injected `IdGenerator` for candidates and skips any that
//! already exist in the collection, so a generator only has to be "unlikely
//! to repeat", not globally unique. `SequentialIds` is the deterministic
//! default; `RandomIds` hands out UUID v4 values.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::types::TodoId;

/// Source of candidate identifiers.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> TodoId;
}

/// Monotonic counter starting at 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u128) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> TodoId {
        let id = TodoId::from_u128(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Random UUID v4 identifiers.
#[derive(Debug, Clone, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> TodoId {
        TodoId::from_uuid(Uuid::new_v4())
    }
}

/// Which built-in generator a session uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    #[default]
    Sequential,
    Random,
}

impl IdStrategy {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Sequential => Box::new(SequentialIds::new()),
            IdStrategy::Random => Box::new(RandomIds),
        }
    }
}

/// Text that names no built-in `IdStrategy`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown id strategy: {0} (expected sequential or random)")]
pub struct UnknownIdStrategy(pub String);

impl std::str::FromStr for IdStrategy {
    type Err = UnknownIdStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(IdStrategy::Sequential),
            "random" => Ok(IdStrategy::Random),
            _ => Err(UnknownIdStrategy(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_count_up_from_one() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(), TodoId::from_u128(1));
        assert_eq!(ids.next_id(), TodoId::from_u128(2));
        assert_eq!(ids.next_id(), TodoId::from_u128(3));
    }

    #[test]
    fn random_ids_differ() {
        let mut ids = RandomIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[test]
    fn id_strategy_parses_case_insensitively() {
        assert_eq!("Random".parse::<IdStrategy>().unwrap(), IdStrategy::Random);
        assert_eq!(
            " sequential ".parse::<IdStrategy>().unwrap(),
            IdStrategy::Sequential
        );
        assert_eq!(
            "time".parse::<IdStrategy>().unwrap_err(),
            UnknownIdStrategy("time".into())
        );
    }

    #[test]
    fn unknown_id_strategy_message_names_the_input() {
        let err = "Uuid7".parse::<IdStrategy>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown id strategy: Uuid7 (expected sequential or random)"
        );
    }
}

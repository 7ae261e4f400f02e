//! Session configuration.

use serde::{Deserialize, Serialize};

use crate::ids::IdStrategy;

/// Knobs a host can set when opening a `Session`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub id_strategy: IdStrategy,

    /// Copy the target item's title and description into the draft on
    /// `begin_edit`. Off by default: editing starts from whatever the form
    /// currently holds.
    pub prefill_on_edit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sequential_without_prefill() {
        let config = SessionConfig::default();
        assert_eq!(config.id_strategy, IdStrategy::Sequential);
        assert!(!config.prefill_on_edit);
    }

    #[test]
    fn deserializes_partial_json() {
        let config: SessionConfig = serde_json::from_str(r#"{"prefill_on_edit":true}"#).unwrap();
        assert_eq!(config.id_strategy, IdStrategy::Sequential);
        assert!(config.prefill_on_edit);

        let config: SessionConfig = serde_json::from_str(r#"{"id_strategy":"random"}"#).unwrap();
        assert_eq!(config.id_strategy, IdStrategy::Random);
    }
}

//! Address space configuration.

use serde::{Deserialize, Serialize};

/// Settings for an [`crate::AddressSpace`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressSpaceConfig {
    /// Server-side page cap for browse results; 0 leaves it to the caller.
    pub max_references_per_node: u32,
    /// Populate namespace 0 (root folders, types, reference hierarchy).
    pub standard_nodes: bool,
}

impl Default for AddressSpaceConfig {
    fn default() -> Self {
        Self {
            max_references_per_node: 0,
            standard_nodes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AddressSpaceConfig =
            serde_json::from_str(r#"{"max_references_per_node": 50}"#).unwrap();
        assert_eq!(config.max_references_per_node, 50);
        assert!(config.standard_nodes);
    }
}

//! Node handle configuration.

use serde::{Deserialize, Serialize};

/// Settings shared by every node handle of one [`crate::NodeManager`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// `max_references_per_node` sent with every browse.
    pub browse_page_size: u32,
    /// Namespace for ids allocated from bare display names.
    pub default_namespace: u16,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            browse_page_size: 100,
            default_namespace: 1,
        }
    }
}

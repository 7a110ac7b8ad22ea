//! Reference descriptions: typed, directed edges between nodes.

use serde::{Deserialize, Serialize};

use crate::attribute::NodeClass;
use crate::ids::ReferenceTypeId;
use crate::node_id::NodeId;
use crate::qualified_name::{LocalizedText, QualifiedName};

/// An edge as seen from its source node.
///
/// `browse_name`, `display_name`, `target_node_class` and
/// `target_type_definition` describe the target, so a browse result can be
/// turned into a node handle without a second round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceDescription {
    pub reference_type_id: NodeId,
    pub is_forward: bool,
    pub target_node_id: NodeId,
    pub browse_name: QualifiedName,
    pub display_name: LocalizedText,
    pub target_node_class: NodeClass,
    pub target_type_definition: NodeId,
}

impl ReferenceDescription {
    /// Forward edge of `reference_type` to `target`.
    ///
    /// The display name defaults to the browse name's text.
    pub fn forward(
        reference_type: ReferenceTypeId,
        target: NodeId,
        browse_name: QualifiedName,
        target_node_class: NodeClass,
        target_type_definition: NodeId,
    ) -> Self {
        Self {
            reference_type_id: reference_type.into(),
            is_forward: true,
            target_node_id: target,
            display_name: LocalizedText::new(browse_name.name.clone()),
            browse_name,
            target_node_class,
            target_type_definition,
        }
    }

    /// True when the edge is of exactly this standard type.
    pub fn is_type(&self, reference_type: ReferenceTypeId) -> bool {
        ReferenceTypeId::from_node_id(&self.reference_type_id) == Some(reference_type)
    }
}

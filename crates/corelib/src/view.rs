//! Browse and browse-path translation request/result records.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::attribute::NodeClass;
use crate::ids::ReferenceTypeId;
use crate::node_id::NodeId;
use crate::qualified_name::QualifiedName;
use crate::status::StatusCode;

/// Which way to follow references from the browsed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrowseDirection {
    #[default]
    Forward,
    Inverse,
    Both,
}

bitflags! {
    /// Target node classes to include. The empty mask and the full mask both
    /// mean all classes, including targets of unspecified class.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct NodeClassMask: u32 {
        const OBJECT = 1;
        const VARIABLE = 2;
        const METHOD = 4;
        const OBJECT_TYPE = 8;
        const VARIABLE_TYPE = 16;
        const REFERENCE_TYPE = 32;
        const DATA_TYPE = 64;
        const VIEW = 128;
    }
}

impl NodeClassMask {
    pub fn includes(self, class: NodeClass) -> bool {
        self.is_empty() || self.is_all() || self.bits() & class as u32 != 0
    }
}

bitflags! {
    /// Reference fields to fill in browse results.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct BrowseResultMask: u32 {
        const REFERENCE_TYPE = 1;
        const IS_FORWARD = 2;
        const NODE_CLASS = 4;
        const BROWSE_NAME = 8;
        const DISPLAY_NAME = 16;
        const TYPE_DEFINITION = 32;
    }
}

/// Browse one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseDescription {
    pub node_to_browse: NodeId,
    pub direction: BrowseDirection,
    pub reference_type_id: NodeId,
    pub include_subtypes: bool,
    pub node_class_mask: NodeClassMask,
    pub result_mask: BrowseResultMask,
}

impl BrowseDescription {
    /// Forward browse of every subtype of `reference_type`, all classes,
    /// all fields.
    pub fn forward(node: NodeId, reference_type: impl Into<NodeId>) -> Self {
        Self {
            node_to_browse: node,
            direction: BrowseDirection::Forward,
            reference_type_id: reference_type.into(),
            include_subtypes: true,
            node_class_mask: NodeClassMask::all(),
            result_mask: BrowseResultMask::all(),
        }
    }
}

/// A browse call: descriptions plus the per-node page cap.
///
/// `max_references_per_node == 0` asks for no cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodesQuery {
    pub nodes_to_browse: Vec<BrowseDescription>,
    pub max_references_per_node: u32,
}

/// One hop of a relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelativePathElement {
    pub reference_type_id: NodeId,
    pub is_inverse: bool,
    pub include_subtypes: bool,
    pub target_name: QualifiedName,
}

impl RelativePathElement {
    /// Forward hierarchical hop to a child named `target_name`.
    pub fn child(target_name: QualifiedName) -> Self {
        Self {
            reference_type_id: ReferenceTypeId::HierarchicalReferences.into(),
            is_inverse: false,
            include_subtypes: true,
            target_name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelativePath {
    pub elements: Vec<RelativePathElement>,
}

impl FromIterator<QualifiedName> for RelativePath {
    fn from_iter<I: IntoIterator<Item = QualifiedName>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().map(RelativePathElement::child).collect(),
        }
    }
}

/// A relative path anchored at a starting node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrowsePath {
    pub starting_node: NodeId,
    pub relative_path: RelativePath,
}

/// Remaining-path index of a fully resolved target.
pub const REMAINING_PATH_INDEX_NONE: u32 = u32::MAX;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrowsePathTarget {
    pub target_id: NodeId,
    pub remaining_path_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsePathResult {
    pub status: StatusCode,
    pub targets: Vec<BrowsePathTarget>,
}

impl BrowsePathResult {
    pub fn bad(status: StatusCode) -> Self {
        Self {
            status,
            targets: Vec::new(),
        }
    }
}

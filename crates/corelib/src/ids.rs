//! Well-known namespace-0 identifiers.
//!
//! Every standard id converts to a `Numeric` node id in namespace 0. Code that
//! compares against these must therefore build ids the same way.

use serde::{Deserialize, Serialize};

use crate::node_id::NodeId;

/// Standard object and type nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ObjectId {
    BaseObjectType = 58,
    FolderType = 61,
    BaseVariableType = 62,
    BaseDataVariableType = 63,
    PropertyType = 68,
    RootFolder = 84,
    ObjectsFolder = 85,
    TypesFolder = 86,
    ViewsFolder = 87,
}

impl ObjectId {
    pub fn browse_name(self) -> &'static str {
        match self {
            ObjectId::BaseObjectType => "BaseObjectType",
            ObjectId::FolderType => "FolderType",
            ObjectId::BaseVariableType => "BaseVariableType",
            ObjectId::BaseDataVariableType => "BaseDataVariableType",
            ObjectId::PropertyType => "PropertyType",
            ObjectId::RootFolder => "Root",
            ObjectId::ObjectsFolder => "Objects",
            ObjectId::TypesFolder => "Types",
            ObjectId::ViewsFolder => "Views",
        }
    }
}

impl From<ObjectId> for NodeId {
    fn from(id: ObjectId) -> Self {
        NodeId::numeric(0, id as u32)
    }
}

/// Standard reference types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ReferenceTypeId {
    References = 31,
    NonHierarchicalReferences = 32,
    HierarchicalReferences = 33,
    HasChild = 34,
    Organizes = 35,
    HasEventSource = 36,
    HasModellingRule = 37,
    HasEncoding = 38,
    HasDescription = 39,
    HasTypeDefinition = 40,
    GeneratesEvent = 41,
    Aggregates = 44,
    HasSubtype = 45,
    HasProperty = 46,
    HasComponent = 47,
    HasNotifier = 48,
    HasOrderedComponent = 49,
}

impl ReferenceTypeId {
    pub const ALL: [ReferenceTypeId; 17] = [
        ReferenceTypeId::References,
        ReferenceTypeId::NonHierarchicalReferences,
        ReferenceTypeId::HierarchicalReferences,
        ReferenceTypeId::HasChild,
        ReferenceTypeId::Organizes,
        ReferenceTypeId::HasEventSource,
        ReferenceTypeId::HasModellingRule,
        ReferenceTypeId::HasEncoding,
        ReferenceTypeId::HasDescription,
        ReferenceTypeId::HasTypeDefinition,
        ReferenceTypeId::GeneratesEvent,
        ReferenceTypeId::Aggregates,
        ReferenceTypeId::HasSubtype,
        ReferenceTypeId::HasProperty,
        ReferenceTypeId::HasComponent,
        ReferenceTypeId::HasNotifier,
        ReferenceTypeId::HasOrderedComponent,
    ];

    /// Direct supertype in the standard hierarchy; `References` is the root.
    pub fn parent(self) -> Option<ReferenceTypeId> {
        use ReferenceTypeId::*;
        let parent = match self {
            References => return None,
            NonHierarchicalReferences | HierarchicalReferences => References,
            HasChild | Organizes | HasEventSource => HierarchicalReferences,
            HasModellingRule | HasEncoding | HasDescription | HasTypeDefinition
            | GeneratesEvent => NonHierarchicalReferences,
            Aggregates | HasSubtype => HasChild,
            HasProperty | HasComponent => Aggregates,
            HasNotifier => HasEventSource,
            HasOrderedComponent => HasComponent,
        };
        Some(parent)
    }

    pub fn browse_name(self) -> &'static str {
        use ReferenceTypeId::*;
        match self {
            References => "References",
            NonHierarchicalReferences => "NonHierarchicalReferences",
            HierarchicalReferences => "HierarchicalReferences",
            HasChild => "HasChild",
            Organizes => "Organizes",
            HasEventSource => "HasEventSource",
            HasModellingRule => "HasModellingRule",
            HasEncoding => "HasEncoding",
            HasDescription => "HasDescription",
            HasTypeDefinition => "HasTypeDefinition",
            GeneratesEvent => "GeneratesEvent",
            Aggregates => "Aggregates",
            HasSubtype => "HasSubtype",
            HasProperty => "HasProperty",
            HasComponent => "HasComponent",
            HasNotifier => "HasNotifier",
            HasOrderedComponent => "HasOrderedComponent",
        }
    }

    /// Abstract reference types cannot be instantiated as edges.
    pub fn is_abstract(self) -> bool {
        use ReferenceTypeId::*;
        matches!(
            self,
            References
                | NonHierarchicalReferences
                | HierarchicalReferences
                | HasChild
                | Aggregates
        )
    }

    /// Reverse lookup from a namespace-0 numeric id.
    pub fn from_node_id(id: &NodeId) -> Option<ReferenceTypeId> {
        match id {
            NodeId::Numeric {
                namespace: 0,
                identifier,
            } => Self::ALL.iter().copied().find(|r| *r as u32 == *identifier),
            _ => None,
        }
    }
}

impl From<ReferenceTypeId> for NodeId {
    fn from(id: ReferenceTypeId) -> Self {
        NodeId::numeric(0, id as u32)
    }
}

/// Built-in data types, ids 0 (Null) through 25 (DiagnosticInfo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum DataTypeId {
    Null = 0,
    Boolean = 1,
    SByte = 2,
    Byte = 3,
    Int16 = 4,
    UInt16 = 5,
    Int32 = 6,
    UInt32 = 7,
    Int64 = 8,
    UInt64 = 9,
    Float = 10,
    Double = 11,
    String = 12,
    DateTime = 13,
    Guid = 14,
    ByteString = 15,
    XmlElement = 16,
    NodeId = 17,
    ExpandedNodeId = 18,
    StatusCode = 19,
    QualifiedName = 20,
    LocalizedText = 21,
    Structure = 22,
    DataValue = 23,
    BaseDataType = 24,
    DiagnosticInfo = 25,
}

impl From<DataTypeId> for NodeId {
    fn from(id: DataTypeId) -> Self {
        NodeId::numeric(0, id as u32)
    }
}

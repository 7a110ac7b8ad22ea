//! Creation of folders, variables and properties under a parent node.
//!
//! Every created node gets the same attribute set, written one attribute at
//! a time through [`Provider::add_attribute`]:
//!
//! | Attribute                 | Folder          | Variable / Property           |
//! |---------------------------|-----------------|-------------------------------|
//! | NodeId                    | new id          | new id                        |
//! | NodeClass                 | Object          | Variable                      |
//! | BrowseName                | name            | name                          |
//! | DisplayName, Description  | name            | name                          |
//! | WriteMask, UserWriteMask  | 0               | 0                             |
//! | EventNotifier             | 0               | 0                             |
//! | Value                     |                 | initial value                 |
//! | DataType                  |                 | built-in type of the value    |
//! | ArrayDimensions           |                 | number of dimensions          |
//! | ValueRank                 |                 | -1 for scalars, else dims     |
//! | Historizing               |                 | false                         |
//! | MinimumSamplingInterval   |                 | 0.0                           |
//!
//! Then two edges: a `HasTypeDefinition` from the new node to its type, and
//! a structural edge from the parent (`Organizes`, `HasComponent` or
//! `HasProperty`). The data type is computed before anything is written, so
//! an unsupported value kind leaves the graph untouched.
//!
//! [`Provider::add_attribute`]: corelib::Provider::add_attribute

use std::sync::Arc;

use tracing::debug;

use corelib::{
    AttributeId, Error, LocalizedText, NodeClass, NodeId, ObjectId, Provider, QualifiedName,
    ReferenceDescription, ReferenceTypeId, Result, Variant,
};

use crate::allocator::NodeIdAllocator;
use crate::node::Node;

/// Value rank of a scalar variable.
pub const VALUE_RANK_SCALAR: i32 = -1;

/// What kind of node a builder call creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    Variable,
    Property,
}

impl NodeKind {
    pub fn node_class(self) -> NodeClass {
        match self {
            NodeKind::Folder => NodeClass::Object,
            NodeKind::Variable | NodeKind::Property => NodeClass::Variable,
        }
    }

    pub fn type_definition(self) -> ObjectId {
        match self {
            NodeKind::Folder => ObjectId::FolderType,
            NodeKind::Variable => ObjectId::BaseDataVariableType,
            NodeKind::Property => ObjectId::PropertyType,
        }
    }

    /// Edge type from the parent to the new node.
    pub fn reference_type(self) -> ReferenceTypeId {
        match self {
            NodeKind::Folder => ReferenceTypeId::Organizes,
            NodeKind::Variable => ReferenceTypeId::HasComponent,
            NodeKind::Property => ReferenceTypeId::HasProperty,
        }
    }
}

/// Creates child nodes under `parent`.
///
/// Names given without a namespace prefix take the parent's browse-name
/// namespace, so `get_child` with the same text finds the new node. Ids for
/// names are drawn from the allocator, in the name's namespace when it is
/// non-zero and in `namespace` otherwise.
pub struct NodeBuilder<'a> {
    parent: &'a Node,
    allocator: &'a dyn NodeIdAllocator,
    namespace: u16,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(parent: &'a Node, allocator: &'a dyn NodeIdAllocator) -> Self {
        Self {
            parent,
            allocator,
            namespace: parent.manager().config().default_namespace,
        }
    }

    /// Namespace for allocated ids of names in namespace 0.
    pub fn in_namespace(mut self, namespace: u16) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn add_folder(&self, name: &str) -> Result<Node> {
        let (id, browse_name) = self.allocate(name)?;
        self.create(NodeKind::Folder, id, browse_name, None)
    }

    pub fn add_folder_with_id(&self, id: NodeId, browse_name: QualifiedName) -> Result<Node> {
        self.create(NodeKind::Folder, id, browse_name, None)
    }

    pub fn add_variable(&self, name: &str, value: impl Into<Variant>) -> Result<Node> {
        let (id, browse_name) = self.allocate(name)?;
        self.create(NodeKind::Variable, id, browse_name, Some(value.into()))
    }

    pub fn add_variable_with_id(
        &self,
        id: NodeId,
        browse_name: QualifiedName,
        value: impl Into<Variant>,
    ) -> Result<Node> {
        self.create(NodeKind::Variable, id, browse_name, Some(value.into()))
    }

    pub fn add_property(&self, name: &str, value: impl Into<Variant>) -> Result<Node> {
        let (id, browse_name) = self.allocate(name)?;
        self.create(NodeKind::Property, id, browse_name, Some(value.into()))
    }

    pub fn add_property_with_id(
        &self,
        id: NodeId,
        browse_name: QualifiedName,
        value: impl Into<Variant>,
    ) -> Result<Node> {
        self.create(NodeKind::Property, id, browse_name, Some(value.into()))
    }

    fn allocate(&self, name: &str) -> Result<(NodeId, QualifiedName)> {
        self.parent.ensure_not_null()?;
        let browse_name = QualifiedName::parse(name, self.parent.browse_name().namespace_index)?;
        if browse_name.is_empty() {
            return Err(Error::malformed(name, "empty browse name"));
        }
        let namespace = match browse_name.namespace_index {
            0 => self.namespace,
            ns => ns,
        };
        Ok((self.allocator.allocate(namespace, &browse_name)?, browse_name))
    }

    fn create(
        &self,
        kind: NodeKind,
        id: NodeId,
        browse_name: QualifiedName,
        value: Option<Variant>,
    ) -> Result<Node> {
        self.parent.ensure_not_null()?;
        if browse_name.is_empty() {
            return Err(Error::malformed(browse_name.to_string(), "empty browse name"));
        }
        let attributes = attribute_set(kind, &id, &browse_name, value)?;

        let provider = self.parent.provider();
        for (attribute, value) in attributes {
            provider.add_attribute(&id, attribute, value)?;
        }
        self.add_references(provider, kind, &id, &browse_name)?;

        debug!(
            parent = %self.parent.id(),
            node = %id,
            name = %browse_name,
            ?kind,
            "node created"
        );
        Ok(Node::with_browse_name(
            Arc::clone(self.parent.manager()),
            id,
            browse_name,
        ))
    }

    fn add_references(
        &self,
        provider: &dyn Provider,
        kind: NodeKind,
        id: &NodeId,
        browse_name: &QualifiedName,
    ) -> Result<()> {
        let type_definition = kind.type_definition();
        let type_class = match kind {
            NodeKind::Folder => NodeClass::ObjectType,
            NodeKind::Variable | NodeKind::Property => NodeClass::VariableType,
        };
        provider.add_reference(
            id,
            &ReferenceDescription::forward(
                ReferenceTypeId::HasTypeDefinition,
                type_definition.into(),
                QualifiedName::new(0, type_definition.browse_name()),
                type_class,
                NodeId::null(),
            ),
        )?;
        provider.add_reference(
            self.parent.id(),
            &ReferenceDescription::forward(
                kind.reference_type(),
                id.clone(),
                browse_name.clone(),
                kind.node_class(),
                type_definition.into(),
            ),
        )
    }
}

/// The attributes of a new node, in write order.
fn attribute_set(
    kind: NodeKind,
    id: &NodeId,
    browse_name: &QualifiedName,
    value: Option<Variant>,
) -> Result<Vec<(AttributeId, Variant)>> {
    let text = LocalizedText::new(browse_name.name.clone());
    let mut attributes = vec![
        (AttributeId::NodeId, Variant::NodeId(id.clone())),
        (AttributeId::NodeClass, kind.node_class().to_variant()),
        (AttributeId::BrowseName, browse_name.clone().into()),
        (AttributeId::DisplayName, text.clone().into()),
        (AttributeId::Description, text.into()),
        (AttributeId::WriteMask, Variant::UInt32(0)),
        (AttributeId::UserWriteMask, Variant::UInt32(0)),
        (AttributeId::EventNotifier, Variant::Byte(0)),
    ];

    if let Some(value) = value {
        let data_type = value.data_type()?;
        let dimensions = value.dimensions();
        let rank = if dimensions.is_empty() {
            VALUE_RANK_SCALAR
        } else {
            i32::try_from(dimensions.len()).unwrap_or(i32::MAX)
        };
        let dimension_count = u32::try_from(dimensions.len()).unwrap_or(u32::MAX);
        attributes.extend([
            (AttributeId::Value, value),
            (AttributeId::DataType, Variant::NodeId(data_type)),
            (AttributeId::ArrayDimensions, Variant::UInt32(dimension_count)),
            (AttributeId::ValueRank, Variant::Int32(rank)),
            (AttributeId::Historizing, Variant::Boolean(false)),
            (AttributeId::MinimumSamplingInterval, Variant::Double(0.0)),
        ]);
    }
    Ok(attributes)
}

impl Node {
    /// Builder using the manager's allocator and default namespace.
    pub fn builder(&self) -> NodeBuilder<'_> {
        NodeBuilder::new(self, self.manager().allocator())
    }

    pub fn add_folder(&self, name: &str) -> Result<Node> {
        self.builder().add_folder(name)
    }

    pub fn add_folder_with_id(&self, id: NodeId, browse_name: QualifiedName) -> Result<Node> {
        self.builder().add_folder_with_id(id, browse_name)
    }

    pub fn add_variable(&self, name: &str, value: impl Into<Variant>) -> Result<Node> {
        self.builder().add_variable(name, value)
    }

    pub fn add_variable_with_id(
        &self,
        id: NodeId,
        browse_name: QualifiedName,
        value: impl Into<Variant>,
    ) -> Result<Node> {
        self.builder().add_variable_with_id(id, browse_name, value)
    }

    pub fn add_property(&self, name: &str, value: impl Into<Variant>) -> Result<Node> {
        self.builder().add_property(name, value)
    }

    pub fn add_property_with_id(
        &self,
        id: NodeId,
        browse_name: QualifiedName,
        value: impl Into<Variant>,
    ) -> Result<Node> {
        self.builder().add_property_with_id(id, browse_name, value)
    }
}

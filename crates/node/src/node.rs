//! The node handle.
//!
//! A [`Node`] is a cheap, clonable reference to one node of the graph. It
//! owns no graph state: every attribute read, write and browse goes through
//! the manager's provider. The only cached value is the browse name the
//! handle was created with.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use corelib::{
    AttributeId, BrowseDescription, Error, LocalizedText, NodeId, NodesQuery, Provider,
    QualifiedName, ReadValueId, ReferenceDescription, ReferenceTypeId, Result, StatusCode,
    Variant, WriteValue,
};

use crate::manager::NodeManager;

#[derive(Clone)]
pub struct Node {
    manager: Arc<NodeManager>,
    id: NodeId,
    browse_name: QualifiedName,
    is_null: bool,
}

impl Node {
    pub(crate) fn new(manager: Arc<NodeManager>, id: NodeId) -> Self {
        Self::with_browse_name(manager, id, QualifiedName::default())
    }

    pub(crate) fn with_browse_name(
        manager: Arc<NodeManager>,
        id: NodeId,
        browse_name: QualifiedName,
    ) -> Self {
        Self {
            manager,
            id,
            browse_name,
            is_null: false,
        }
    }

    pub(crate) fn null(manager: Arc<NodeManager>) -> Self {
        Self {
            manager,
            id: NodeId::null(),
            browse_name: QualifiedName::default(),
            is_null: true,
        }
    }

    // ========================================================================
    // Identity
    // ========================================================================

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Cached browse name; empty when the handle was built from a bare id.
    pub fn browse_name(&self) -> &QualifiedName {
        &self.browse_name
    }

    pub fn set_browse_name_cache(&mut self, browse_name: QualifiedName) {
        self.browse_name = browse_name;
    }

    pub fn is_null(&self) -> bool {
        self.is_null
    }

    pub fn manager(&self) -> &Arc<NodeManager> {
        &self.manager
    }

    pub(crate) fn provider(&self) -> &dyn Provider {
        self.manager.provider()
    }

    pub(crate) fn ensure_not_null(&self) -> Result<()> {
        if self.is_null {
            Err(Error::NullNode)
        } else {
            Ok(())
        }
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Read one attribute.
    ///
    /// A missing result or a bad status is `AttributeNotFound`. A good result
    /// with no value reads as [`Variant::Null`].
    pub fn read(&self, attribute: AttributeId) -> Result<Variant> {
        self.ensure_not_null()?;
        let request = ReadValueId::new(self.id.clone(), attribute);
        let results = self.provider().read(std::slice::from_ref(&request))?;

        let Some(data_value) = results.into_iter().next() else {
            return Err(self.attribute_not_found(attribute, StatusCode::BAD_ATTRIBUTE_ID_INVALID));
        };
        if data_value.status.is_bad() {
            trace!(node = %self.id, ?attribute, status = %data_value.status, "read failed");
            return Err(self.attribute_not_found(attribute, data_value.status));
        }
        Ok(data_value.value.unwrap_or_default())
    }

    /// Write one attribute and return the provider's status for it.
    ///
    /// A bad status is returned as a value, not an error.
    pub fn write(&self, attribute: AttributeId, value: impl Into<Variant>) -> Result<StatusCode> {
        self.ensure_not_null()?;
        let request = WriteValue::new(self.id.clone(), attribute, value);
        let statuses = self.provider().write(std::slice::from_ref(&request))?;

        let status = statuses
            .into_iter()
            .next()
            .ok_or_else(|| {
                self.attribute_not_found(attribute, StatusCode::BAD_ATTRIBUTE_ID_INVALID)
            })?;
        debug!(node = %self.id, ?attribute, %status, "attribute written");
        Ok(status)
    }

    pub fn read_value(&self) -> Result<Variant> {
        self.read(AttributeId::Value)
    }

    pub fn write_value(&self, value: impl Into<Variant>) -> Result<StatusCode> {
        self.write(AttributeId::Value, value)
    }

    /// Current browse name from the provider.
    ///
    /// An absent attribute or a value of another kind reads as an empty name.
    pub fn read_browse_name(&self) -> Result<QualifiedName> {
        match self.read(AttributeId::BrowseName) {
            Ok(Variant::QualifiedName(name)) => Ok(name),
            Ok(other) => {
                warn!(
                    node = %self.id,
                    kind = ?other.variant_type(),
                    "browse name has unexpected kind"
                );
                Ok(QualifiedName::default())
            }
            Err(err) if err.is_not_found() => Ok(QualifiedName::default()),
            Err(err) => Err(err),
        }
    }

    /// Rename the node. The cached browse name follows on a good status.
    pub fn write_browse_name(&mut self, browse_name: QualifiedName) -> Result<StatusCode> {
        let status = self.write(AttributeId::BrowseName, browse_name.clone())?;
        if status.is_good() {
            self.browse_name = browse_name;
        }
        Ok(status)
    }

    pub fn read_display_name(&self) -> Result<LocalizedText> {
        match self.read(AttributeId::DisplayName)? {
            Variant::LocalizedText(text) => Ok(text),
            _ => Err(self.attribute_not_found(
                AttributeId::DisplayName,
                StatusCode::BAD_TYPE_MISMATCH,
            )),
        }
    }

    pub fn read_data_type(&self) -> Result<NodeId> {
        match self.read(AttributeId::DataType)? {
            Variant::NodeId(id) => Ok(id),
            _ => Err(self.attribute_not_found(
                AttributeId::DataType,
                StatusCode::BAD_TYPE_MISMATCH,
            )),
        }
    }

    fn attribute_not_found(&self, attribute: AttributeId, status: StatusCode) -> Error {
        Error::AttributeNotFound {
            node: self.id.clone(),
            attribute,
            status,
        }
    }

    // ========================================================================
    // Browse
    // ========================================================================

    /// Targets of this node's forward references of `reference_type` and its
    /// subtypes, across all continuation pages, in provider order.
    pub fn browse(&self, reference_type: impl Into<NodeId>) -> Result<Vec<Node>> {
        Ok(self
            .browse_references(reference_type)?
            .into_iter()
            .map(|r| {
                Node::with_browse_name(Arc::clone(&self.manager), r.target_node_id, r.browse_name)
            })
            .collect())
    }

    /// Raw reference descriptions behind [`Node::browse`].
    pub fn browse_references(
        &self,
        reference_type: impl Into<NodeId>,
    ) -> Result<Vec<ReferenceDescription>> {
        self.ensure_not_null()?;
        let query = NodesQuery {
            nodes_to_browse: vec![BrowseDescription::forward(self.id.clone(), reference_type)],
            max_references_per_node: self.manager.config().browse_page_size,
        };

        let mut references = self.provider().browse(&query)?;
        let mut pages = 1;
        if !references.is_empty() {
            loop {
                let page = self.provider().browse_next()?;
                if page.is_empty() {
                    break;
                }
                pages += 1;
                references.extend(page);
            }
        }
        trace!(node = %self.id, pages, count = references.len(), "browse complete");
        Ok(references)
    }

    /// Hierarchical children: folders, variables, properties and the like.
    pub fn get_children(&self) -> Result<Vec<Node>> {
        self.browse(ReferenceTypeId::HierarchicalReferences)
    }

    pub fn get_properties(&self) -> Result<Vec<Node>> {
        self.browse(ReferenceTypeId::HasProperty)
    }

    /// Children reached over `HasComponent`.
    ///
    /// Objects are components too, so this is a superset of the variables.
    pub fn get_variables(&self) -> Result<Vec<Node>> {
        self.browse(ReferenceTypeId::HasComponent)
    }

    /// Hierarchical child whose browse name equals `name`, found by browsing.
    ///
    /// Unlike [`Node::get_child_qualified`] a missing child is `Ok(None)`.
    pub fn find_child(&self, name: &QualifiedName) -> Result<Option<Node>> {
        Ok(self
            .get_children()?
            .into_iter()
            .find(|child| child.browse_name() == name))
    }
}

/// Handles are equal when both are null, or both are non-null with equal ids.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.is_null == other.is_null && (self.is_null || self.id == other.id)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_null.hash(state);
        if !self.is_null {
            self.id.hash(state);
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null {
            write!(f, "Node(*null)")
        } else {
            write!(f, "Node({}, id={})", self.browse_name, self.id)
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("browse_name", &self.browse_name)
            .field("is_null", &self.is_null)
            .finish()
    }
}

//! In-memory address space.
//!
//! Nodes live in a `DashMap` keyed by `NodeId`. Each record holds the node's
//! attributes and its forward references; inverse references are derived by
//! scanning, and `HasSubtype` edges are indexed for subtype checks.
//!
//! # Locking
//!
//! No method holds a map guard while taking another one: references are
//! cloned out first and looked up afterwards.

use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, trace};

use corelib::{
    AttributeId, BrowsePath, BrowsePathResult, DataTypeId, DataValue, NodeClass, NodeId,
    NodesQuery, Provider, QualifiedName, ReadValueId, ReferenceDescription, ReferenceTypeId,
    Result, StatusCode, Variant, WriteValue,
};

use crate::browse::Continuation;
use crate::config::AddressSpaceConfig;
use crate::standard;

/// Attributes and forward references of one node.
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeRecord {
    pub(crate) attributes: BTreeMap<AttributeId, DataValue>,
    pub(crate) references: Vec<ReferenceDescription>,
}

/// The graph a server exposes, held in process.
pub struct AddressSpace {
    pub(crate) nodes: DashMap<NodeId, NodeRecord>,
    /// subtype -> direct supertype, from `HasSubtype` edges.
    pub(crate) supertypes: DashMap<NodeId, NodeId>,
    pub(crate) continuation: Mutex<Option<Continuation>>,
    pub(crate) config: AddressSpaceConfig,
}

impl AddressSpace {
    pub fn new(config: AddressSpaceConfig) -> Self {
        let space = Self {
            nodes: DashMap::new(),
            supertypes: DashMap::new(),
            continuation: Mutex::new(None),
            config,
        };
        if space.config.standard_nodes {
            standard::populate(&space);
        }
        debug!(nodes = space.nodes.len(), "address space created");
        space
    }

    /// Address space without any namespace-0 content.
    pub fn empty() -> Self {
        Self::new(AddressSpaceConfig {
            standard_nodes: false,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &AddressSpaceConfig {
        &self.config
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Stored value of one attribute.
    pub fn attribute(&self, node: &NodeId, attribute: AttributeId) -> Option<DataValue> {
        self.nodes
            .get(node)
            .and_then(|record| record.attributes.get(&attribute).cloned())
    }

    /// Forward references as stored.
    pub fn references(&self, node: &NodeId) -> Vec<ReferenceDescription> {
        self.nodes
            .get(node)
            .map(|record| record.references.clone())
            .unwrap_or_default()
    }

    /// Upsert an attribute, creating the node if needed.
    pub fn insert_attribute(&self, node: &NodeId, attribute: AttributeId, value: Variant) {
        trace!(%node, ?attribute, "add attribute");
        self.nodes
            .entry(node.clone())
            .or_default()
            .attributes
            .insert(attribute, DataValue::new(value));
    }

    /// Append a forward reference. Exact duplicates are ignored.
    pub fn insert_reference(&self, source: &NodeId, reference: &ReferenceDescription) {
        trace!(%source, target = %reference.target_node_id, "add reference");
        {
            let mut record = self.nodes.entry(source.clone()).or_default();
            if record.references.contains(reference) {
                return;
            }
            record.references.push(reference.clone());
        }
        if reference.is_forward && reference.is_type(ReferenceTypeId::HasSubtype) {
            self.supertypes
                .insert(reference.target_node_id.clone(), source.clone());
        }
    }

    /// True when `candidate` is `base` or one of its subtypes.
    ///
    /// Follows indexed `HasSubtype` edges and falls back to the standard
    /// reference hierarchy for namespace-0 types that are not in the graph.
    pub fn is_subtype_of(&self, candidate: &NodeId, base: &NodeId) -> bool {
        let mut visited = HashSet::new();
        let mut current = candidate.clone();
        loop {
            if &current == base {
                return true;
            }
            if !visited.insert(current.clone()) {
                return false;
            }
            let next = self.supertypes.get(&current).map(|parent| parent.clone());
            current = match next {
                Some(parent) => parent,
                None => match ReferenceTypeId::from_node_id(&current).and_then(|r| r.parent()) {
                    Some(parent) => parent.into(),
                    None => return false,
                },
            };
        }
    }

    pub(crate) fn browse_name_of(&self, node: &NodeId) -> Option<QualifiedName> {
        self.attribute(node, AttributeId::BrowseName)
            .and_then(|dv| dv.value)
            .and_then(|v| v.as_qualified_name().cloned())
    }

    pub(crate) fn node_class_of(&self, node: &NodeId) -> NodeClass {
        self.attribute(node, AttributeId::NodeClass)
            .and_then(|dv| dv.value)
            .and_then(|v| v.as_i32())
            .and_then(NodeClass::from_i32)
            .unwrap_or_default()
    }

    pub(crate) fn type_definition_of(&self, node: &NodeId) -> NodeId {
        self.nodes
            .get(node)
            .and_then(|record| {
                record
                    .references
                    .iter()
                    .find(|r| r.is_forward && r.is_type(ReferenceTypeId::HasTypeDefinition))
                    .map(|r| r.target_node_id.clone())
            })
            .unwrap_or_default()
    }

    fn read_one(&self, request: &ReadValueId) -> DataValue {
        match self.nodes.get(&request.node_id) {
            None => DataValue::bad(StatusCode::BAD_NODE_ID_UNKNOWN),
            Some(record) => record
                .attributes
                .get(&request.attribute_id)
                .cloned()
                .unwrap_or_else(|| DataValue::bad(StatusCode::BAD_ATTRIBUTE_ID_INVALID)),
        }
    }

    fn write_one(&self, request: &WriteValue) -> StatusCode {
        let Some(mut record) = self.nodes.get_mut(&request.node_id) else {
            return StatusCode::BAD_NODE_ID_UNKNOWN;
        };
        if !record.attributes.contains_key(&request.attribute_id) {
            return StatusCode::BAD_ATTRIBUTE_ID_INVALID;
        }
        if request.attribute_id == AttributeId::Value {
            let declared = record
                .attributes
                .get(&AttributeId::DataType)
                .and_then(|dv| dv.value.as_ref())
                .and_then(|v| v.as_node_id())
                .cloned();
            if let (Some(declared), Some(value)) = (declared, request.value.value.as_ref()) {
                if !value_fits(&declared, value) {
                    return StatusCode::BAD_TYPE_MISMATCH;
                }
            }
        }
        let stored = request.value.clone().with_server_timestamp(Utc::now());
        record.attributes.insert(request.attribute_id, stored);
        StatusCode::GOOD
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new(AddressSpaceConfig::default())
    }
}

/// Null values always fit; otherwise the value's data type must match the
/// declared one, unless the node accepts any type. A node declared with the
/// Null data type was created without a value and takes its first one freely.
fn value_fits(declared: &NodeId, value: &Variant) -> bool {
    if value.is_null()
        || *declared == NodeId::from(DataTypeId::BaseDataType)
        || *declared == NodeId::from(DataTypeId::Null)
    {
        return true;
    }
    match value.data_type() {
        Ok(actual) => &actual == declared,
        Err(_) => false,
    }
}

impl Provider for AddressSpace {
    fn browse(&self, query: &NodesQuery) -> Result<Vec<ReferenceDescription>> {
        Ok(self.start_browse(query))
    }

    fn browse_next(&self) -> Result<Vec<ReferenceDescription>> {
        Ok(self.next_page())
    }

    fn read(&self, requests: &[ReadValueId]) -> Result<Vec<DataValue>> {
        Ok(requests.iter().map(|r| self.read_one(r)).collect())
    }

    fn write(&self, requests: &[WriteValue]) -> Result<Vec<StatusCode>> {
        Ok(requests.iter().map(|r| self.write_one(r)).collect())
    }

    fn translate_browse_paths_to_node_ids(
        &self,
        paths: &[BrowsePath],
    ) -> Result<Vec<BrowsePathResult>> {
        Ok(paths.iter().map(|p| self.translate(p)).collect())
    }

    fn add_attribute(&self, node: &NodeId, attribute: AttributeId, value: Variant) -> Result<()> {
        self.insert_attribute(node, attribute, value);
        Ok(())
    }

    fn add_reference(&self, source: &NodeId, reference: &ReferenceDescription) -> Result<()> {
        self.insert_reference(source, reference);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "AddressSpace"
    }
}

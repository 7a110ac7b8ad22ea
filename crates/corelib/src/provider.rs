//! Graph-capability provider trait.

use crate::attribute::{AttributeId, ReadValueId, WriteValue};
use crate::error::Result;
use crate::node_id::NodeId;
use crate::reference::ReferenceDescription;
use crate::status::StatusCode;
use crate::variant::{DataValue, Variant};
use crate::view::{BrowsePath, BrowsePathResult, NodesQuery};

/// The operations node handles need from whatever stores the graph.
///
/// A server implements this over its in-process address space; a client
/// implements it over its session channel. Transport failures surface as
/// [`crate::Error::Provider`] and are never interpreted by callers.
///
/// Implementations must be thread-safe (Send + Sync): node handles sharing a
/// provider may be used from several threads at once. Writes are not
/// serialized by callers; ordering is the provider's business.
pub trait Provider: Send + Sync {
    /// Start browsing. Returns the first page of references.
    ///
    /// The provider keeps the continuation; [`Provider::browse_next`] returns
    /// the following pages. Callers run one continuation sequence at a time.
    fn browse(&self, query: &NodesQuery) -> Result<Vec<ReferenceDescription>>;

    /// Next page of the current browse. An empty page means done.
    fn browse_next(&self) -> Result<Vec<ReferenceDescription>>;

    /// One result per request, in request order.
    fn read(&self, requests: &[ReadValueId]) -> Result<Vec<DataValue>>;

    /// One status per request, in request order.
    fn write(&self, requests: &[WriteValue]) -> Result<Vec<StatusCode>>;

    /// Resolve each browse path to its target nodes.
    fn translate_browse_paths_to_node_ids(
        &self,
        paths: &[BrowsePath],
    ) -> Result<Vec<BrowsePathResult>>;

    /// Register an attribute value on a node, creating the node if needed.
    fn add_attribute(&self, node: &NodeId, attribute: AttributeId, value: Variant) -> Result<()>;

    /// Register an edge whose source is `source`.
    fn add_reference(&self, source: &NodeId, reference: &ReferenceDescription) -> Result<()>;

    /// Name of this provider (for logging).
    fn name(&self) -> &'static str;
}

//! Root-node factory.
//!
//! A `NodeManager` bundles the provider with the allocator and settings its
//! node handles share. Handles keep it alive through an `Arc`, so none can
//! outlive its provider.

use std::fmt;
use std::sync::Arc;

use corelib::{NodeId, ObjectId, Provider, QualifiedName};

use crate::allocator::{NodeIdAllocator, SequentialAllocator};
use crate::config::NodeConfig;
use crate::node::Node;

pub struct NodeManager {
    provider: Arc<dyn Provider>,
    allocator: Arc<dyn NodeIdAllocator>,
    config: NodeConfig,
}

impl NodeManager {
    /// Manager with default settings and a [`SequentialAllocator`].
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            allocator: Arc::new(SequentialAllocator::default()),
            config: NodeConfig::default(),
        }
    }

    pub fn with_allocator(mut self, allocator: Arc<dyn NodeIdAllocator>) -> Self {
        self.allocator = allocator;
        self
    }

    pub fn with_config(mut self, config: NodeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    pub fn allocator(&self) -> &dyn NodeIdAllocator {
        self.allocator.as_ref()
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn root(self: &Arc<Self>) -> Node {
        self.standard_node(ObjectId::RootFolder)
    }

    pub fn objects(self: &Arc<Self>) -> Node {
        self.standard_node(ObjectId::ObjectsFolder)
    }

    /// Handle for an arbitrary id. The browse name cache starts empty.
    pub fn node(self: &Arc<Self>, id: NodeId) -> Node {
        Node::new(Arc::clone(self), id)
    }

    pub fn null_node(self: &Arc<Self>) -> Node {
        Node::null(Arc::clone(self))
    }

    fn standard_node(self: &Arc<Self>, id: ObjectId) -> Node {
        Node::with_browse_name(
            Arc::clone(self),
            id.into(),
            QualifiedName::new(0, id.browse_name()),
        )
    }
}

impl fmt::Debug for NodeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeManager")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish()
    }
}

//! Node id allocation for nodes created from a bare name.
//!
//! Allocators are explicit values owned by a [`crate::NodeManager`] (or
//! handed straight to a [`crate::NodeBuilder`]), so tests can supply
//! deterministic ids.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use tracing::warn;

use corelib::{Error, NodeId, QualifiedName, Result};

/// Produces the id of a node about to be created.
pub trait NodeIdAllocator: Send + Sync {
    fn allocate(&self, namespace: u16, browse_name: &QualifiedName) -> Result<NodeId>;
}

/// Numeric ids counting up from a starting value.
///
/// `u32::MAX` is the last id handed out; after it every call fails with
/// [`Error::AllocatorExhausted`] instead of wrapping to ids already in use.
#[derive(Debug)]
pub struct SequentialAllocator {
    next: AtomicU32,
    exhausted: AtomicBool,
}

impl SequentialAllocator {
    pub const DEFAULT_START: u32 = 1000;

    pub fn new(start: u32) -> Self {
        Self {
            next: AtomicU32::new(start),
            exhausted: AtomicBool::new(false),
        }
    }
}

impl Default for SequentialAllocator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START)
    }
}

impl NodeIdAllocator for SequentialAllocator {
    fn allocate(&self, namespace: u16, _browse_name: &QualifiedName) -> Result<NodeId> {
        match self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
        {
            Ok(id) => Ok(NodeId::numeric(namespace, id)),
            // Counter is parked at u32::MAX; hand that id out exactly once.
            Err(last) if !self.exhausted.swap(true, Ordering::Relaxed) => {
                Ok(NodeId::numeric(namespace, last))
            }
            Err(_) => {
                warn!(namespace, "sequential node id allocator exhausted");
                Err(Error::AllocatorExhausted { namespace })
            }
        }
    }
}

/// String ids equal to the browse name.
///
/// Two siblings with the same name collide; use it only where names are
/// unique per namespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct NameAllocator;

impl NodeIdAllocator for NameAllocator {
    fn allocate(&self, namespace: u16, browse_name: &QualifiedName) -> Result<NodeId> {
        Ok(NodeId::string(namespace, browse_name.name.clone()))
    }
}

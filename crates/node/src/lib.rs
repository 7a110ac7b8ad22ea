//! Node handles over a graph provider.
//!
//! This crate provides the client-facing view of the address space:
//! - `Node` handles with attribute access and paged browsing
//! - Child lookup by text or qualified-name paths
//! - A builder for folders, variables and properties
//! - Pluggable node id allocation
//!
//! Handles are created from a [`NodeManager`], which owns the provider:
//!
//! ```ignore
//! let manager = Arc::new(NodeManager::new(Arc::new(AddressSpace::default())));
//! let objects = manager.objects();
//! let speed = objects.add_variable("Speed", 3.5)?;
//! assert_eq!(objects.get_child("Speed")?, speed);
//! ```

pub mod allocator;
pub mod builder;
pub mod config;
pub mod manager;
pub mod node;
pub mod path;

pub use allocator::{NameAllocator, NodeIdAllocator, SequentialAllocator};
pub use builder::{NodeBuilder, NodeKind, VALUE_RANK_SCALAR};
pub use config::NodeConfig;
pub use manager::NodeManager;
pub use node::Node;
pub use path::parse_path;

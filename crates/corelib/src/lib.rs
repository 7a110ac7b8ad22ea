//! Core protocol model for the node layer.
//!
//! This crate provides the value types node handles and providers exchange:
//! - Node identifiers and qualified names
//! - Variants, data values and status codes
//! - Attributes, node classes and well-known ids
//! - Reference descriptions and browse/translate requests
//! - The `Provider` capability trait

pub mod attribute;
pub mod error;
pub mod ids;
pub mod node_id;
pub mod provider;
pub mod qualified_name;
pub mod reference;
pub mod status;
pub mod variant;
pub mod view;

pub use attribute::{AttributeId, NodeClass, ReadValueId, WriteValue};
pub use error::{Error, ProviderError, Result};
pub use ids::{DataTypeId, ObjectId, ReferenceTypeId};
pub use node_id::{NodeId, NodeIdKind};
pub use provider::Provider;
pub use qualified_name::{LocalizedText, QualifiedName};
pub use reference::ReferenceDescription;
pub use status::StatusCode;
pub use variant::{DataValue, Variant, VariantType};
pub use view::{
    BrowseDescription, BrowseDirection, BrowsePath, BrowsePathResult, BrowsePathTarget,
    BrowseResultMask, NodeClassMask, NodesQuery, RelativePath, RelativePathElement,
};

//! Error types for the core library.

use thiserror::Error;

use crate::attribute::AttributeId;
use crate::node_id::NodeId;
use crate::qualified_name::QualifiedName;
use crate::status::StatusCode;
use crate::variant::VariantType;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by node operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The provider returned no usable value for an attribute.
    #[error("attribute {attribute:?} not found on node {node} ({status})")]
    AttributeNotFound {
        node: NodeId,
        attribute: AttributeId,
        status: StatusCode,
    },

    /// Browse path translation did not resolve to a target.
    #[error("path {} not found from node {start} ({status})", render_path(.path))]
    PathNotFound {
        start: NodeId,
        path: Vec<QualifiedName>,
        status: StatusCode,
    },

    /// The variant tag has no built-in data type.
    #[error("variant kind {0:?} has no data type")]
    UnsupportedVariantKind(VariantType),

    /// Identifier or qualified name text could not be parsed.
    #[error("malformed identifier text {text:?}: {reason}")]
    MalformedIdentifierText { text: String, reason: String },

    /// The operation was attempted on the null node.
    #[error("operation on null node")]
    NullNode,

    /// The id allocator has handed out its last identifier.
    #[error("node id allocator exhausted in namespace {namespace}")]
    AllocatorExhausted { namespace: u16 },

    /// Failure reported by the provider; passed through untouched.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl Error {
    /// Create a malformed text error.
    pub fn malformed(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifierText {
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// True for the not-found family (attribute or path).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::AttributeNotFound { .. } | Error::PathNotFound { .. }
        )
    }
}

/// Errors originating below this layer (transport, channel, session).
///
/// The core never retries or interprets these.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider connection has been torn down.
    #[error("provider disconnected")]
    Disconnected,

    /// The provider rejected a whole service call.
    #[error("provider fault {status}: {context}")]
    Fault { status: StatusCode, context: String },

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

fn render_path(path: &[QualifiedName]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/")
}

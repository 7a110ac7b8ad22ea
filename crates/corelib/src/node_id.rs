//! Node identifiers.
//!
//! A `NodeId` is a namespace-scoped identifier in one of six encodings. The
//! encoding tag is part of the identity: `TwoByte(5)` and
//! `Numeric { namespace: 0, identifier: 5 }` name different nodes.
//!
//! # Text form
//!
//! ```text
//! <namespace>:<identifier>
//! ```
//!
//! Numeric tags render in decimal, string ids verbatim, byte strings as
//! lowercase hex pairs and guids in hyphenated form. The identifier kind is
//! never guessed from text; `parse` always yields a string id and
//! `parse_as` takes the kind from the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Encoding tag of a [`NodeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeIdKind {
    TwoByte,
    FourByte,
    Numeric,
    String,
    Guid,
    ByteString,
}

/// Polymorphic node identifier.
///
/// Ordering is by (tag, namespace, identifier), which is what the derived
/// impls give given the variant and field order below.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeId {
    /// Namespace is always 0.
    TwoByte(u8),
    FourByte { namespace: u8, identifier: u16 },
    Numeric { namespace: u16, identifier: u32 },
    String { namespace: u16, identifier: String },
    Guid { namespace: u16, identifier: Uuid },
    ByteString { namespace: u16, identifier: Vec<u8> },
}

impl NodeId {
    pub fn two_byte(identifier: u8) -> Self {
        NodeId::TwoByte(identifier)
    }

    pub fn four_byte(namespace: u8, identifier: u16) -> Self {
        NodeId::FourByte {
            namespace,
            identifier,
        }
    }

    pub fn numeric(namespace: u16, identifier: u32) -> Self {
        NodeId::Numeric {
            namespace,
            identifier,
        }
    }

    pub fn string(namespace: u16, identifier: impl Into<String>) -> Self {
        NodeId::String {
            namespace,
            identifier: identifier.into(),
        }
    }

    pub fn guid(namespace: u16, identifier: Uuid) -> Self {
        NodeId::Guid {
            namespace,
            identifier,
        }
    }

    pub fn byte_string(namespace: u16, identifier: impl Into<Vec<u8>>) -> Self {
        NodeId::ByteString {
            namespace,
            identifier: identifier.into(),
        }
    }

    /// The null id, `0:0` numeric.
    pub fn null() -> Self {
        NodeId::numeric(0, 0)
    }

    /// True for any numeric-family id in namespace 0 with identifier 0.
    pub fn is_null(&self) -> bool {
        match self {
            NodeId::TwoByte(id) => *id == 0,
            NodeId::FourByte {
                namespace,
                identifier,
            } => *namespace == 0 && *identifier == 0,
            NodeId::Numeric {
                namespace,
                identifier,
            } => *namespace == 0 && *identifier == 0,
            _ => false,
        }
    }

    pub fn kind(&self) -> NodeIdKind {
        match self {
            NodeId::TwoByte(_) => NodeIdKind::TwoByte,
            NodeId::FourByte { .. } => NodeIdKind::FourByte,
            NodeId::Numeric { .. } => NodeIdKind::Numeric,
            NodeId::String { .. } => NodeIdKind::String,
            NodeId::Guid { .. } => NodeIdKind::Guid,
            NodeId::ByteString { .. } => NodeIdKind::ByteString,
        }
    }

    /// Namespace index; two-byte ids report 0.
    pub fn namespace_index(&self) -> u16 {
        match self {
            NodeId::TwoByte(_) => 0,
            NodeId::FourByte { namespace, .. } => u16::from(*namespace),
            NodeId::Numeric { namespace, .. }
            | NodeId::String { namespace, .. }
            | NodeId::Guid { namespace, .. }
            | NodeId::ByteString { namespace, .. } => *namespace,
        }
    }

    /// Parse `"<ns>:<identifier>"` or a bare identifier into a string id.
    ///
    /// A bare identifier lands in `default_namespace`.
    pub fn parse(text: &str, default_namespace: u16) -> Result<Self> {
        Self::parse_as(text, default_namespace, NodeIdKind::String)
    }

    /// Parse text into an id of the requested kind.
    pub fn parse_as(text: &str, default_namespace: u16, kind: NodeIdKind) -> Result<Self> {
        let (namespace, identifier) = split_namespace(text)?;
        let namespace = namespace.unwrap_or(default_namespace);

        let id = match kind {
            NodeIdKind::TwoByte => {
                if namespace != 0 {
                    return Err(Error::malformed(text, "two-byte ids live in namespace 0"));
                }
                NodeId::TwoByte(parse_number(text, identifier)?)
            }
            NodeIdKind::FourByte => {
                let namespace = u8::try_from(namespace).map_err(|_| {
                    Error::malformed(text, "four-byte namespace index exceeds 255")
                })?;
                NodeId::four_byte(namespace, parse_number(text, identifier)?)
            }
            NodeIdKind::Numeric => NodeId::numeric(namespace, parse_number(text, identifier)?),
            NodeIdKind::String => NodeId::string(namespace, identifier),
            NodeIdKind::Guid => {
                let guid = Uuid::parse_str(identifier)
                    .map_err(|e| Error::malformed(text, format!("guid: {e}")))?;
                NodeId::guid(namespace, guid)
            }
            NodeIdKind::ByteString => {
                let bytes = hex::decode(identifier)
                    .map_err(|e| Error::malformed(text, format!("byte string: {e}")))?;
                NodeId::byte_string(namespace, bytes)
            }
        };
        Ok(id)
    }

    /// Canonical form, except two-byte ids drop their (always 0) namespace.
    pub fn to_short_string(&self) -> String {
        match self {
            NodeId::TwoByte(id) => id.to_string(),
            other => other.to_string(),
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        NodeId::null()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::TwoByte(id) => write!(f, "0:{id}"),
            NodeId::FourByte {
                namespace,
                identifier,
            } => write!(f, "{namespace}:{identifier}"),
            NodeId::Numeric {
                namespace,
                identifier,
            } => write!(f, "{namespace}:{identifier}"),
            NodeId::String {
                namespace,
                identifier,
            } => write!(f, "{namespace}:{identifier}"),
            NodeId::Guid {
                namespace,
                identifier,
            } => write!(f, "{namespace}:{}", identifier.hyphenated()),
            NodeId::ByteString {
                namespace,
                identifier,
            } => write!(f, "{namespace}:{}", hex::encode(identifier)),
        }
    }
}

impl FromStr for NodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NodeId::parse(s, 0)
    }
}

/// Split `"<ns>:<rest>"` at the first separator.
///
/// Text without a separator yields `None` for the namespace. A prefix that
/// is not a decimal `u16` is an error, never a silent default.
pub(crate) fn split_namespace(text: &str) -> Result<(Option<u16>, &str)> {
    match text.split_once(':') {
        None => Ok((None, text)),
        Some((prefix, rest)) => {
            if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::malformed(
                    text,
                    format!("namespace prefix {prefix:?} is not a decimal index"),
                ));
            }
            let ns = prefix.parse::<u16>().map_err(|e| {
                Error::malformed(text, format!("namespace prefix {prefix:?}: {e}"))
            })?;
            Ok((Some(ns), rest))
        }
    }
}

fn parse_number<T: FromStr>(text: &str, identifier: &str) -> Result<T>
where
    T::Err: fmt::Display,
{
    identifier
        .parse::<T>()
        .map_err(|e| Error::malformed(text, format!("numeric identifier {identifier:?}: {e}")))
}

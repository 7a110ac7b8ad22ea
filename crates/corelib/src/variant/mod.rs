//! Variant values.
//!
//! A [`Variant`] carries any protocol value. The tag decides which accessor
//! is meaningful; the `as_*` accessors return `None` for every other tag.

pub mod data_type;
pub mod data_value;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::node_id::NodeId;
use crate::qualified_name::{LocalizedText, QualifiedName};
use crate::status::StatusCode;

pub use data_value::DataValue;

/// Tag of a [`Variant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VariantType {
    Null,
    Boolean,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float,
    Double,
    String,
    DateTime,
    Guid,
    ByteString,
    XmlElement,
    NodeId,
    ExpandedNodeId,
    StatusCode,
    QualifiedName,
    LocalizedText,
    DiagnosticInfo,
    DataValue,
    Variant,
    ExtensionObject,
}

impl VariantType {
    pub const ALL: [VariantType; 26] = [
        VariantType::Null,
        VariantType::Boolean,
        VariantType::SByte,
        VariantType::Byte,
        VariantType::Int16,
        VariantType::UInt16,
        VariantType::Int32,
        VariantType::UInt32,
        VariantType::Int64,
        VariantType::UInt64,
        VariantType::Float,
        VariantType::Double,
        VariantType::String,
        VariantType::DateTime,
        VariantType::Guid,
        VariantType::ByteString,
        VariantType::XmlElement,
        VariantType::NodeId,
        VariantType::ExpandedNodeId,
        VariantType::StatusCode,
        VariantType::QualifiedName,
        VariantType::LocalizedText,
        VariantType::DiagnosticInfo,
        VariantType::DataValue,
        VariantType::Variant,
        VariantType::ExtensionObject,
    ];
}

/// Node id qualified with a namespace uri and server index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpandedNodeId {
    pub node_id: NodeId,
    pub namespace_uri: Option<String>,
    pub server_index: u32,
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node_id: NodeId) -> Self {
        Self {
            node_id,
            namespace_uri: None,
            server_index: 0,
        }
    }
}

/// Vendor diagnostics attached to a status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticInfo {
    pub symbolic_id: Option<i32>,
    pub namespace_uri: Option<i32>,
    pub localized_text: Option<i32>,
    pub locale: Option<i32>,
    pub additional_info: Option<String>,
    pub inner_status_code: Option<StatusCode>,
    pub inner_diagnostic_info: Option<Box<DiagnosticInfo>>,
}

/// Opaque encoded structure identified by its encoding id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionObject {
    pub type_id: NodeId,
    pub body: Vec<u8>,
}

/// Array of same-tagged values.
///
/// Empty `dimensions` means a one-dimensional array of `values.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantArray {
    pub element_type: VariantType,
    pub values: Vec<Variant>,
    pub dimensions: Vec<u32>,
}

/// Tagged protocol value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Variant {
    #[default]
    Null,
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    DateTime(DateTime<Utc>),
    Guid(Uuid),
    ByteString(Vec<u8>),
    XmlElement(String),
    NodeId(NodeId),
    ExpandedNodeId(ExpandedNodeId),
    StatusCode(StatusCode),
    QualifiedName(QualifiedName),
    LocalizedText(LocalizedText),
    DiagnosticInfo(Box<DiagnosticInfo>),
    DataValue(Box<DataValue>),
    Variant(Box<Variant>),
    ExtensionObject(ExtensionObject),
    Array(VariantArray),
}

impl Variant {
    /// One-dimensional array of `element_type` values.
    pub fn array(element_type: VariantType, values: Vec<Variant>) -> Self {
        Variant::Array(VariantArray {
            element_type,
            values,
            dimensions: Vec::new(),
        })
    }

    /// The tag. Arrays report their element tag.
    pub fn variant_type(&self) -> VariantType {
        match self {
            Variant::Null => VariantType::Null,
            Variant::Boolean(_) => VariantType::Boolean,
            Variant::SByte(_) => VariantType::SByte,
            Variant::Byte(_) => VariantType::Byte,
            Variant::Int16(_) => VariantType::Int16,
            Variant::UInt16(_) => VariantType::UInt16,
            Variant::Int32(_) => VariantType::Int32,
            Variant::UInt32(_) => VariantType::UInt32,
            Variant::Int64(_) => VariantType::Int64,
            Variant::UInt64(_) => VariantType::UInt64,
            Variant::Float(_) => VariantType::Float,
            Variant::Double(_) => VariantType::Double,
            Variant::String(_) => VariantType::String,
            Variant::DateTime(_) => VariantType::DateTime,
            Variant::Guid(_) => VariantType::Guid,
            Variant::ByteString(_) => VariantType::ByteString,
            Variant::XmlElement(_) => VariantType::XmlElement,
            Variant::NodeId(_) => VariantType::NodeId,
            Variant::ExpandedNodeId(_) => VariantType::ExpandedNodeId,
            Variant::StatusCode(_) => VariantType::StatusCode,
            Variant::QualifiedName(_) => VariantType::QualifiedName,
            Variant::LocalizedText(_) => VariantType::LocalizedText,
            Variant::DiagnosticInfo(_) => VariantType::DiagnosticInfo,
            Variant::DataValue(_) => VariantType::DataValue,
            Variant::Variant(_) => VariantType::Variant,
            Variant::ExtensionObject(_) => VariantType::ExtensionObject,
            Variant::Array(array) => array.element_type,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Variant::Array(_))
    }

    /// Array dimensions; empty for scalars.
    pub fn dimensions(&self) -> Vec<u32> {
        match self {
            Variant::Array(array) if array.dimensions.is_empty() => {
                vec![u32::try_from(array.values.len()).unwrap_or(u32::MAX)]
            }
            Variant::Array(array) => array.dimensions.clone(),
            _ => Vec::new(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Variant::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Variant::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Variant::UInt32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Variant::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Variant::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(v) | Variant::XmlElement(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_node_id(&self) -> Option<&NodeId> {
        match self {
            Variant::NodeId(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_qualified_name(&self) -> Option<&QualifiedName> {
        match self {
            Variant::QualifiedName(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_localized_text(&self) -> Option<&LocalizedText> {
        match self {
            Variant::LocalizedText(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_status_code(&self) -> Option<StatusCode> {
        match self {
            Variant::StatusCode(v) => Some(*v),
            _ => None,
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Variant {
                fn from(v: $ty) -> Self {
                    Variant::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Boolean,
    i8 => SByte,
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
    String => String,
    DateTime<Utc> => DateTime,
    Uuid => Guid,
    NodeId => NodeId,
    ExpandedNodeId => ExpandedNodeId,
    StatusCode => StatusCode,
    QualifiedName => QualifiedName,
    LocalizedText => LocalizedText,
    ExtensionObject => ExtensionObject,
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Variant::String(v.to_owned())
    }
}

impl From<DataValue> for Variant {
    fn from(v: DataValue) -> Self {
        Variant::DataValue(Box::new(v))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Null => f.write_str("null"),
            Variant::Boolean(v) => write!(f, "{v}"),
            Variant::SByte(v) => write!(f, "{v}"),
            Variant::Byte(v) => write!(f, "{v}"),
            Variant::Int16(v) => write!(f, "{v}"),
            Variant::UInt16(v) => write!(f, "{v}"),
            Variant::Int32(v) => write!(f, "{v}"),
            Variant::UInt32(v) => write!(f, "{v}"),
            Variant::Int64(v) => write!(f, "{v}"),
            Variant::UInt64(v) => write!(f, "{v}"),
            Variant::Float(v) => write!(f, "{v}"),
            Variant::Double(v) => write!(f, "{v}"),
            Variant::String(v) | Variant::XmlElement(v) => f.write_str(v),
            Variant::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
            Variant::Guid(v) => write!(f, "{}", v.hyphenated()),
            Variant::ByteString(v) => f.write_str(&hex::encode(v)),
            Variant::NodeId(v) => write!(f, "{v}"),
            Variant::ExpandedNodeId(v) => write!(f, "{}", v.node_id),
            Variant::StatusCode(v) => write!(f, "{v}"),
            Variant::QualifiedName(v) => write!(f, "{v}"),
            Variant::LocalizedText(v) => write!(f, "{v}"),
            Variant::DiagnosticInfo(_) => f.write_str("DiagnosticInfo"),
            Variant::DataValue(v) => match &v.value {
                Some(inner) => write!(f, "DataValue({inner}, {})", v.status),
                None => write!(f, "DataValue({})", v.status),
            },
            Variant::Variant(v) => write!(f, "Variant({v})"),
            Variant::ExtensionObject(v) => write!(f, "ExtensionObject({})", v.type_id),
            Variant::Array(array) => {
                f.write_str("[")?;
                for (i, value) in array.values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}

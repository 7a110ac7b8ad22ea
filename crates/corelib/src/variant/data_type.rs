//! Variant tag to built-in data type mapping.
//!
//! Used to derive the DATA_TYPE attribute of new variable and property
//! nodes. Total over every tag except `ExtensionObject` and nested
//! `Variant`, which carry no concrete built-in type.

use crate::error::{Error, Result};
use crate::ids::DataTypeId;
use crate::node_id::NodeId;

use super::{Variant, VariantType};

impl VariantType {
    pub fn data_type(self) -> Result<DataTypeId> {
        let id = match self {
            VariantType::Null => DataTypeId::Null,
            VariantType::Boolean => DataTypeId::Boolean,
            VariantType::SByte => DataTypeId::SByte,
            VariantType::Byte => DataTypeId::Byte,
            VariantType::Int16 => DataTypeId::Int16,
            VariantType::UInt16 => DataTypeId::UInt16,
            VariantType::Int32 => DataTypeId::Int32,
            VariantType::UInt32 => DataTypeId::UInt32,
            VariantType::Int64 => DataTypeId::Int64,
            VariantType::UInt64 => DataTypeId::UInt64,
            VariantType::Float => DataTypeId::Float,
            VariantType::Double => DataTypeId::Double,
            VariantType::String => DataTypeId::String,
            VariantType::DateTime => DataTypeId::DateTime,
            VariantType::Guid => DataTypeId::Guid,
            VariantType::ByteString => DataTypeId::ByteString,
            VariantType::XmlElement => DataTypeId::XmlElement,
            VariantType::NodeId => DataTypeId::NodeId,
            VariantType::ExpandedNodeId => DataTypeId::ExpandedNodeId,
            VariantType::StatusCode => DataTypeId::StatusCode,
            VariantType::QualifiedName => DataTypeId::QualifiedName,
            VariantType::LocalizedText => DataTypeId::LocalizedText,
            VariantType::DiagnosticInfo => DataTypeId::DiagnosticInfo,
            VariantType::DataValue => DataTypeId::DataValue,
            VariantType::Variant | VariantType::ExtensionObject => {
                return Err(Error::UnsupportedVariantKind(self))
            }
        };
        Ok(id)
    }
}

impl Variant {
    /// DATA_TYPE node id for this value; arrays use their element tag.
    pub fn data_type(&self) -> Result<NodeId> {
        self.variant_type().data_type().map(NodeId::from)
    }
}

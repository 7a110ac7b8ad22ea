//! Attribute values with status and timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::StatusCode;

use super::Variant;

/// A read result: value, status and optional timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataValue {
    pub value: Option<Variant>,
    pub status: StatusCode,
    pub source_timestamp: Option<DateTime<Utc>>,
    pub server_timestamp: Option<DateTime<Utc>>,
}

impl DataValue {
    /// Good value without timestamps.
    pub fn new(value: impl Into<Variant>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Valueless result carrying a status.
    pub fn bad(status: StatusCode) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn with_server_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.server_timestamp = Some(at);
        self
    }

    /// The value when the status is good.
    pub fn good_value(&self) -> Option<&Variant> {
        if self.status.is_good() {
            self.value.as_ref()
        } else {
            None
        }
    }
}

impl From<Variant> for DataValue {
    fn from(value: Variant) -> Self {
        Self {
            value: Some(value),
            ..Default::default()
        }
    }
}

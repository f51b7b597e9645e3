//! Action responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ProtocolError;
use crate::types::StagedRecord;

/// `{success: true, ...}` or `{success: false, error}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl ActionResponse {
    /// Successful response with no extra fields.
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: Map::new(),
        }
    }

    /// Failed response.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            data: Map::new(),
        }
    }

    /// Add a field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Merge the fields of a staged record.
    pub fn with_record(mut self, record: &StagedRecord) -> Result<Self, ProtocolError> {
        if let Value::Object(fields) = serde_json::to_value(record)? {
            self.data.extend(fields);
        }
        Ok(self)
    }

    /// Read a string field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Read a boolean field.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.data.get(key).and_then(Value::as_bool)
    }

    /// Reinterpret the fields as a staged record.
    pub fn record(&self) -> Option<StagedRecord> {
        if !self.success {
            return None;
        }
        serde_json::from_value(Value::Object(self.data.clone())).ok()
    }
}

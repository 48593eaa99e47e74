//! The uniform result shape returned for every upstream call.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of one upstream request, win or lose.
///
/// Every field is always populated; `message` is the only optional part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub data: Value,
    pub success: bool,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    /// A successful outcome carrying `data`.
    pub fn success(data: Value, status: u16, message: Option<String>) -> Self {
        Self {
            data,
            success: true,
            status,
            message,
        }
    }

    /// A failed outcome with an empty `data` object.
    pub fn failure(status: u16, message: Option<String>) -> Self {
        Self {
            data: empty_data(),
            success: false,
            status,
            message,
        }
    }

    /// The message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// The `{}` payload used whenever there is nothing to return.
pub fn empty_data() -> Value {
    Value::Object(Map::new())
}

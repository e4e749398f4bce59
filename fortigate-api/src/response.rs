use serde_json::Value;

use crate::error::ApiError;
use crate::record::Record;

/// Status and optional JSON body of an API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// Any 2xx status counts as success.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Extract the `results` array of a CMDB listing body.
pub fn results(path: &str, body: Value) -> Result<Vec<Record>, ApiError> {
    let shape = |reason: &str| ApiError::Shape {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let Value::Object(mut top) = body else {
        return Err(shape("body is not a JSON object"));
    };
    let Some(Value::Array(items)) = top.remove("results") else {
        return Err(shape("missing `results` array"));
    };

    items
        .into_iter()
        .map(|item| Record::try_from(item).map_err(|_| shape("`results` entry is not an object")))
        .collect()
}

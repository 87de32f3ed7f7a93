//! Response envelope shared by every JSON endpoint.

use serde::Serialize;
use serde_json::Value;

/// Outcome block carried by every response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseStatus {
    pub is_success: bool,

    /// Error kind, present only on failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,

    pub message: String,
}

/// JSON envelope: `{ "status": { "isSuccess", "message" }, "data": ... }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: ResponseStatus,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus {
                is_success: true,
                code: None,
                message: message.into(),
            },
            data,
        }
    }
}

impl Envelope<Value> {
    pub fn failure(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Self {
            status: ResponseStatus {
                is_success: false,
                code: Some(code),
                message: message.into(),
            },
            data: details,
        }
    }
}

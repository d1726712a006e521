use axum::Json;
use serde::{Deserialize, Serialize};

/// Uniform JSON wrapper for every API response. `code == 0` means success.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<T>,
}

/// Success body for endpoints that return nothing beyond the status.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Empty {}

impl<T: Serialize> Envelope<T> {
    pub fn ok(body: T) -> Json<Self> {
        Json(Self {
            code: 0,
            message: "ok".into(),
            body: Some(body),
        })
    }
}

impl Envelope<Empty> {
    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            body: None,
        }
    }
}

//! Response envelope returned to API Gateway by Lambda functions.

use crate::json::to_spaced_string;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiGatewayResponse {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// 200 with an already-encoded JSON body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Error envelope with a `{"error": <message>}` body.
    pub fn error(status_code: u16, message: &str) -> Self {
        let body = to_spaced_string(&ErrorBody { error: message }).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to encode error body");
            String::from("{}")
        });
        Self::new(status_code, body)
    }
}

//! Response envelope returned by every orders route.
//!
//! # Design Decisions
//! - One envelope shape, versioned by the `x-envelope-version` header
//! - `orders` is present (possibly empty) on success, absent on error
//! - Bodies are encoded explicitly so encoding failures surface as 500

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::rpc::Order;

/// Response header carrying the envelope version.
pub const X_ENVELOPE_VERSION: &str = "x-envelope-version";

/// Current envelope version.
pub const ENVELOPE_VERSION: &str = "1";

pub const SUCCESS_MESSAGE: &str = "Orders retrieved successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub status: EnvelopeStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<Vec<Order>>,
}

impl ResponseEnvelope {
    pub fn success(orders: Vec<Order>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: SUCCESS_MESSAGE.to_string(),
            orders: Some(orders),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: message.into(),
            orders: None,
        }
    }

    /// Encode as a JSON response with the given status.
    pub fn encode(&self, status: StatusCode) -> Result<Response, serde_json::Error> {
        let body = serde_json::to_vec(self)?;
        Ok((
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            body,
        )
            .into_response())
    }
}

//! Failure taxonomy for the orders route.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tonic::Status;

use crate::http::response::ResponseEnvelope;

/// Every way an orders request can terminate without a success envelope.
#[derive(Debug, Error)]
pub enum OrdersError {
    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),

    /// Customer service failed; its text is passed through.
    #[error("{}", status_text(.0))]
    CustomerLookup(Status),

    #[error("customer with this email does not exist")]
    CustomerNotFound,

    /// Order service failed; its text is passed through.
    #[error("{}", status_text(.0))]
    OrderLookup(Status),

    #[error("customer id {0} is out of range for order lookup")]
    CustomerIdOutOfRange(i64),

    #[error("{0}")]
    Encode(#[from] serde_json::Error),

    /// The lookups did not finish within the inbound request timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),
}

impl OrdersError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidEmail(_) | Self::CustomerLookup(_) | Self::CustomerNotFound => {
                StatusCode::BAD_REQUEST
            }
            Self::OrderLookup(_) | Self::CustomerIdOutOfRange(_) | Self::Encode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEmail(_) => "invalid_email",
            Self::CustomerLookup(_) => "customer_lookup",
            Self::CustomerNotFound => "customer_not_found",
            Self::OrderLookup(_) => "order_lookup",
            Self::CustomerIdOutOfRange(_) => "customer_id_out_of_range",
            Self::Encode(_) => "encode",
            Self::Timeout(_) => "timeout",
        }
    }
}

/// Remote error text: the status message, or the code description if the
/// upstream sent none.
fn status_text(status: &Status) -> &str {
    if status.message().is_empty() {
        status.code().description()
    } else {
        status.message()
    }
}

impl IntoResponse for OrdersError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match ResponseEnvelope::error(message.clone()).encode(status) {
            Ok(response) => response,
            Err(_) => (status, message).into_response(),
        }
    }
}

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, request ID)
//!     → orders.rs (handler)
//!         → request.rs (query extraction, mailbox validation)
//!         → rpc::CustomerDirectory, then rpc::OrderDirectory
//!     → response.rs (envelope) / error.rs (failure → status + envelope)
//!     → Send to client
//! ```

pub mod error;
pub mod orders;
pub mod request;
pub mod response;
pub mod server;

pub use error::OrdersError;
pub use request::X_REQUEST_ID;
pub use response::{EnvelopeStatus, ResponseEnvelope};
pub use server::{AppState, HttpServer};

//! Customer orders gateway library.
//!
//! Serves `GET /orders/?email=...` by resolving the customer through the
//! upstream customer service and returning that customer's orders from the
//! upstream order service.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rpc;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, envelope version)
//! - Serve on a bound listener until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderName, HeaderValue},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::{GatewayConfig, TimeoutConfig};
use crate::http::orders::get_customer_orders;
use crate::http::response::{ENVELOPE_VERSION, X_ENVELOPE_VERSION};
use crate::rpc::{CustomerDirectory, OrderDirectory, RpcGateway};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerDirectory>,
    pub orders: Arc<dyn OrderDirectory>,
    /// Upper bound on both lookups together.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(customers: Arc<dyn CustomerDirectory>, orders: Arc<dyn OrderDirectory>) -> Self {
        Self {
            customers,
            orders,
            request_timeout: Duration::from_secs(TimeoutConfig::default().request_secs),
        }
    }

    /// Both lookups served by one upstream gateway.
    pub fn from_gateway(gateway: RpcGateway) -> Self {
        let gateway = Arc::new(gateway);
        Self::new(gateway.clone(), gateway)
    }
}

/// HTTP server for the orders gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &GatewayConfig, state: AppState) -> Self {
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let state = AppState {
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
            ..state
        };

        let orders = Router::new()
            .route("/orders/", get(get_customer_orders))
            .route("/orders/{*rest}", get(get_customer_orders))
            .layer(SetResponseHeaderLayer::overriding(
                HeaderName::from_static(X_ENVELOPE_VERSION),
                HeaderValue::from_static(ENVELOPE_VERSION),
            ));

        Router::new()
            .merge(orders)
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. In-flight requests are drained first.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "customer-orders-gateway"
    }))
}

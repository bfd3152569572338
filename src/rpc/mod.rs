//! Transport gateway to the upstream RPC services.
//!
//! # Data Flow
//! ```text
//! UpstreamConfig
//!     → channel.rs (one TLS channel, opened at startup)
//!     → metadata.rs (static credentials on every call)
//!     → customer.rs / orders.rs (typed stubs over the shared channel)
//!     → RpcGateway (CustomerDirectory + OrderDirectory for the handler)
//! ```
//!
//! # Design Decisions
//! - The channel is multiplexed; stubs are cloned per call, never locked
//! - The handler only sees the directory traits, never tonic clients
//! - No retries at this boundary

pub mod channel;
pub mod customer;
pub mod metadata;
pub mod orders;
pub mod proto;

use std::time::Instant;

use async_trait::async_trait;
use thiserror::Error;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel;
use tonic::Status;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::rpc::customer::CustomerConnectorClient;
use crate::rpc::metadata::{MetadataError, MetadataInterceptor};
use crate::rpc::orders::OrdersConnectorClient;

pub use channel::ConnectError;
pub use proto::{Customer, Order};

/// Channel with credential metadata applied to each request.
pub type AuthedChannel = InterceptedService<Channel, MetadataInterceptor>;

/// Resolves customers by email.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// All customers registered under `email`, in upstream order. An empty
    /// list is a valid answer.
    async fn customers_by_email(&self, email: &str) -> Result<Vec<Customer>, Status>;
}

/// Resolves the orders placed by one customer.
#[async_trait]
pub trait OrderDirectory: Send + Sync {
    async fn orders_for_customer(&self, customer_id: i32) -> Result<Vec<Order>, Status>;
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// Both typed stubs, sharing one upstream channel.
#[derive(Clone)]
pub struct RpcGateway {
    customers: CustomerConnectorClient<AuthedChannel>,
    orders: OrdersConnectorClient<AuthedChannel>,
}

impl RpcGateway {
    /// Connect to the configured upstream and build both stubs.
    pub async fn connect(config: &UpstreamConfig) -> Result<Self, GatewayError> {
        let interceptor = MetadataInterceptor::new(&config.metadata)?;
        let channel = channel::connect(config).await?;

        tracing::debug!(
            metadata_keys = ?interceptor.keys().collect::<Vec<_>>(),
            "Upstream stubs ready"
        );

        Ok(Self::from_channel(channel, interceptor))
    }

    /// Build the stubs over an existing channel. Cannot fail.
    pub fn from_channel(channel: Channel, interceptor: MetadataInterceptor) -> Self {
        Self {
            customers: CustomerConnectorClient::new(InterceptedService::new(
                channel.clone(),
                interceptor.clone(),
            )),
            orders: OrdersConnectorClient::new(InterceptedService::new(channel, interceptor)),
        }
    }
}

#[async_trait]
impl CustomerDirectory for RpcGateway {
    async fn customers_by_email(&self, email: &str) -> Result<Vec<Customer>, Status> {
        let start = Instant::now();
        let mut client = self.customers.clone();
        let result = client
            .get_customer_by_email(proto::customer::Email {
                email: email.to_string(),
            })
            .await;

        metrics::record_upstream_call("customer", result.is_ok(), start);
        result.map(|response| response.into_inner().customers)
    }
}

#[async_trait]
impl OrderDirectory for RpcGateway {
    async fn orders_for_customer(&self, customer_id: i32) -> Result<Vec<Order>, Status> {
        let start = Instant::now();
        let mut client = self.orders.clone();
        let result = client
            .get_orders_for_customer(proto::orders::CustomerId {
                customerid: customer_id,
            })
            .await;

        metrics::record_upstream_call("orders", result.is_ok(), start);
        result.map(|response| response.into_inner().orders)
    }
}

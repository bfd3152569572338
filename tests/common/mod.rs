//! Shared doubles and helpers for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tonic::Status;
use tower::ServiceExt;

use customer_orders_gateway::config::GatewayConfig;
use customer_orders_gateway::http::{AppState, HttpServer};
use customer_orders_gateway::rpc::{Customer, CustomerDirectory, Order, OrderDirectory};

/// Customer service double returning a fixed answer.
#[derive(Default)]
pub struct StaticCustomers {
    pub answer: Option<Result<Vec<Customer>, Status>>,
    pub calls: AtomicUsize,
    pub last_email: Mutex<Option<String>>,
    pub delay: Option<Duration>,
}

impl StaticCustomers {
    pub fn returning(customers: Vec<Customer>) -> Self {
        Self {
            answer: Some(Ok(customers)),
            ..Default::default()
        }
    }

    pub fn failing(status: Status) -> Self {
        Self {
            answer: Some(Err(status)),
            ..Default::default()
        }
    }

    /// Answer only after `delay` has elapsed.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CustomerDirectory for StaticCustomers {
    async fn customers_by_email(&self, email: &str) -> Result<Vec<Customer>, Status> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_email.lock().unwrap() = Some(email.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answer.clone().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Order service double returning a fixed answer and recording the ids it
/// was asked about.
#[derive(Default)]
pub struct StaticOrders {
    pub answer: Option<Result<Vec<Order>, Status>>,
    pub requested: Mutex<Vec<i32>>,
}

impl StaticOrders {
    pub fn returning(orders: Vec<Order>) -> Self {
        Self {
            answer: Some(Ok(orders)),
            ..Default::default()
        }
    }

    pub fn failing(status: Status) -> Self {
        Self {
            answer: Some(Err(status)),
            ..Default::default()
        }
    }

    pub fn requested(&self) -> Vec<i32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderDirectory for StaticOrders {
    async fn orders_for_customer(&self, customer_id: i32) -> Result<Vec<Order>, Status> {
        self.requested.lock().unwrap().push(customer_id);
        self.answer.clone().unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn customer(customerid: i64, email: &str) -> Customer {
    Customer {
        customerid,
        email: email.to_string(),
        ..Default::default()
    }
}

pub fn order(orderid: i64, customerid: i32, status: &str) -> Order {
    Order {
        orderid,
        customerid,
        status: status.to_string(),
        total: 10.0 * orderid as f64,
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

/// Fully layered router backed by the given doubles.
pub fn router(customers: Arc<StaticCustomers>, orders: Arc<StaticOrders>) -> Router {
    router_with_config(&GatewayConfig::default(), customers, orders)
}

pub fn router_with_config(
    config: &GatewayConfig,
    customers: Arc<StaticCustomers>,
    orders: Arc<StaticOrders>,
) -> Router {
    HttpServer::new(config, AppState::new(customers, orders)).into_router()
}

/// Issue a GET through the router and decode the JSON body.
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, HeaderMap, serde_json::Value) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, headers, json)
}

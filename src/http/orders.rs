//! `GET /orders/?email=...`: resolve a customer, then return their orders.

use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::error::OrdersError;
use crate::http::request::{first_email, parse_mailbox, request_id, QueryPairs};
use crate::http::response::ResponseEnvelope;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::rpc::{CustomerDirectory, Order, OrderDirectory};

pub async fn get_customer_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers);

    let email = match query {
        Ok(Query(pairs)) => first_email(&pairs).to_string(),
        Err(rejection) => {
            tracing::debug!(request_id = %request_id, error = %rejection, "Unreadable query string");
            String::new()
        }
    };

    let lookup = lookup_orders(state.customers.as_ref(), state.orders.as_ref(), &email);
    let result = match tokio::time::timeout(state.request_timeout, lookup).await {
        Ok(result) => result,
        Err(_) => Err(OrdersError::Timeout(state.request_timeout.as_secs())),
    };

    let response = match result.and_then(|orders| {
        ResponseEnvelope::success(orders)
            .encode(StatusCode::OK)
            .map_err(OrdersError::from)
    }) {
        Ok(response) => {
            tracing::debug!(request_id = %request_id, "Orders retrieved");
            response
        }
        Err(err) => {
            if err.status_code().is_server_error() {
                tracing::error!(request_id = %request_id, kind = err.kind(), error = %err, "Orders request failed");
            } else {
                tracing::warn!(request_id = %request_id, kind = err.kind(), error = %err, "Orders request rejected");
            }
            err.into_response()
        }
    };

    metrics::record_request("orders", response.status().as_u16(), start_time);
    response
}

/// Validate `email`, resolve its first customer and fetch that customer's
/// orders. The order lookup is never issued before the customer lookup
/// has produced a match.
pub async fn lookup_orders(
    customers: &dyn CustomerDirectory,
    orders: &dyn OrderDirectory,
    email: &str,
) -> Result<Vec<Order>, OrdersError> {
    let address =
        parse_mailbox(email).ok_or_else(|| OrdersError::InvalidEmail(email.to_string()))?;

    let matches = customers
        .customers_by_email(address)
        .await
        .map_err(OrdersError::CustomerLookup)?;

    let customer = matches.first().ok_or(OrdersError::CustomerNotFound)?;
    if matches.len() > 1 {
        tracing::debug!(matches = matches.len(), "Multiple customers for email, using first");
    }

    let customer_id = i32::try_from(customer.customerid)
        .map_err(|_| OrdersError::CustomerIdOutOfRange(customer.customerid))?;

    orders
        .orders_for_customer(customer_id)
        .await
        .map_err(OrdersError::OrderLookup)
}

//! End-to-end: a bound server answering real HTTP requests until shutdown.

use std::sync::Arc;
use std::time::Duration;

use customer_orders_gateway::config::GatewayConfig;
use customer_orders_gateway::http::{AppState, HttpServer};
use customer_orders_gateway::lifecycle::Shutdown;

mod common;

use common::{customer, order, StaticCustomers, StaticOrders};

#[tokio::test]
async fn test_serves_orders_and_drains_on_shutdown() {
    let customers = Arc::new(StaticCustomers::returning(vec![customer(42, "a@b.com")]));
    let orders = Arc::new(StaticOrders::returning(vec![
        order(1, 42, "placed"),
        order(2, 42, "shipped"),
    ]));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&GatewayConfig::default(), AppState::new(customers, orders));
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client
        .get(format!("http://{}/orders/", addr))
        .query(&[("email", "a@b.com")])
        .header("x-request-id", "req-e2e")
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["x-request-id"], "req-e2e");
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["orders"].as_array().unwrap().len(), 2);
    assert_eq!(body["orders"][0]["orderid"], 1);
    assert_eq!(body["orders"][1]["orderid"], 2);

    let res = client
        .post(format!("http://{}/orders/", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 405);

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

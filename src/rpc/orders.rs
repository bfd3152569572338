//! Client stub for the remote `orders.OrdersConnector` service.

use tonic::codegen::*;

use crate::rpc::proto::orders::{CustomerId, OrdersResponse};

const SERVICE: &str = "orders.OrdersConnector";

#[derive(Debug, Clone)]
pub struct OrdersConnectorClient<T> {
    inner: tonic::client::Grpc<T>,
}

impl<T> OrdersConnectorClient<T>
where
    T: tonic::client::GrpcService<tonic::body::Body>,
    T::Error: Into<StdError>,
    T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
    <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
{
    pub fn new(inner: T) -> Self {
        Self {
            inner: tonic::client::Grpc::new(inner),
        }
    }

    pub async fn get_orders_for_customer(
        &mut self,
        request: impl tonic::IntoRequest<CustomerId>,
    ) -> Result<tonic::Response<OrdersResponse>, tonic::Status> {
        self.inner.ready().await.map_err(|e| {
            tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
        })?;
        let codec = tonic_prost::ProstCodec::default();
        let path =
            http::uri::PathAndQuery::from_static("/orders.OrdersConnector/GetOrdersForCustomer");
        let mut req = request.into_request();
        req.extensions_mut()
            .insert(GrpcMethod::new(SERVICE, "GetOrdersForCustomer"));
        self.inner.unary(req, path, codec).await
    }
}

//! Client stub for the remote `customer.CustomerConnector` service.

use tonic::codegen::*;

use crate::rpc::proto::customer::{CustomerResponse, Email};

const SERVICE: &str = "customer.CustomerConnector";

#[derive(Debug, Clone)]
pub struct CustomerConnectorClient<T> {
    inner: tonic::client::Grpc<T>,
}

impl<T> CustomerConnectorClient<T>
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

    /// Look up every customer registered under `email`.
    pub async fn get_customer_by_email(
        &mut self,
        request: impl tonic::IntoRequest<Email>,
    ) -> Result<tonic::Response<CustomerResponse>, tonic::Status> {
        self.inner.ready().await.map_err(|e| {
            tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
        })?;
        let codec = tonic_prost::ProstCodec::default();
        let path =
            http::uri::PathAndQuery::from_static("/customer.CustomerConnector/GetCustomerByEmail");
        let mut req = request.into_request();
        req.extensions_mut()
            .insert(GrpcMethod::new(SERVICE, "GetCustomerByEmail"));
        self.inner.unary(req, path, codec).await
    }
}

//! Wire messages for the upstream customer and order services.
//!
//! These mirror the `customer` and `orders` protobuf packages, declared by
//! hand with `prost` derives. Field tags must match the upstream `.proto`
//! files.

pub mod customer {
    use serde::{Deserialize, Serialize};

    /// Request for `CustomerConnector/GetCustomerByEmail`.
    #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
    pub struct Email {
        #[prost(string, tag = "1")]
        pub email: ::prost::alloc::string::String,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
    pub struct Customer {
        #[prost(int64, tag = "1")]
        pub customerid: i64,
        #[prost(string, tag = "2")]
        pub email: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub firstname: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub lastname: ::prost::alloc::string::String,
    }

    /// Every customer matching the requested email, in upstream order.
    #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
    pub struct CustomerResponse {
        #[prost(message, repeated, tag = "1")]
        pub customers: ::prost::alloc::vec::Vec<Customer>,
    }
}

pub mod orders {
    use serde::{Deserialize, Serialize};

    /// Request for `OrdersConnector/GetOrdersForCustomer`.
    #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
    pub struct CustomerId {
        #[prost(int32, tag = "1")]
        pub customerid: i32,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
    pub struct OrderResponse {
        #[prost(int64, tag = "1")]
        pub orderid: i64,
        #[prost(int32, tag = "2")]
        pub customerid: i32,
        #[prost(string, tag = "3")]
        pub status: ::prost::alloc::string::String,
        #[prost(double, tag = "4")]
        pub total: f64,
        #[prost(string, tag = "5")]
        pub created_at: ::prost::alloc::string::String,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
    pub struct OrdersResponse {
        #[prost(message, repeated, tag = "1")]
        pub orders: ::prost::alloc::vec::Vec<OrderResponse>,
    }
}

pub use customer::Customer;
pub use orders::OrderResponse as Order;

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_customer_response_preserves_order() {
        let response = customer::CustomerResponse {
            customers: vec![
                Customer {
                    customerid: 42,
                    email: "a@b.com".into(),
                    ..Default::default()
                },
                Customer {
                    customerid: 7,
                    email: "a@b.com".into(),
                    ..Default::default()
                },
            ],
        };

        let bytes = response.encode_to_vec();
        let decoded = customer::CustomerResponse::decode(bytes.as_slice()).unwrap();
        let ids: Vec<i64> = decoded.customers.iter().map(|c| c.customerid).collect();
        assert_eq!(ids, vec![42, 7]);
    }

    #[test]
    fn test_order_json_field_names() {
        let order = Order {
            orderid: 1001,
            customerid: 42,
            status: "shipped".into(),
            total: 19.5,
            created_at: "2024-03-01T10:00:00Z".into(),
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["orderid"], 1001);
        assert_eq!(value["customerid"], 42);
        assert_eq!(value["status"], "shipped");
        assert_eq!(value["created_at"], "2024-03-01T10:00:00Z");
    }
}

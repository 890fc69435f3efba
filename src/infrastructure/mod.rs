pub mod http_order_gateway;
pub mod models;

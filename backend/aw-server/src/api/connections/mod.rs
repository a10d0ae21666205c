pub mod connection_request;
pub mod connection_response;
pub mod connections;

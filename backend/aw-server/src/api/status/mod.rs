pub mod status;
pub mod status_response;

pub mod reload;
pub mod reload_response;
pub mod shutdown;

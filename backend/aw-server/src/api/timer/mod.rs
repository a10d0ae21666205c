pub mod timer;
pub mod timer_response;

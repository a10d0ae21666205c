pub mod admin;
pub mod connections;
pub mod error;
pub mod status;
pub mod timer;

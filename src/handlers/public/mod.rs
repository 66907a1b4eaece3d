pub mod auth;
pub mod carrier;
pub mod ready;

pub mod bids;
pub mod carrier;
pub mod email;
pub mod notifications;
pub mod payments;
pub mod reset_tokens;
pub mod shipments;
pub mod users;

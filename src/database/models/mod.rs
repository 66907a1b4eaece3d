pub mod bid;
pub mod notification;
pub mod payment;
pub mod reset_token;
pub mod shipment;
pub mod user;

pub use bid::Bid;
pub use notification::Notification;
pub use payment::Payment;
pub use reset_token::PasswordResetToken;
pub use shipment::Shipment;
pub use user::User;

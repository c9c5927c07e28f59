pub mod dispatch;
pub mod fcm;
pub mod request;

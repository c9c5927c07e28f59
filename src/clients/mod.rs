pub mod fcm;
pub mod rbmq;

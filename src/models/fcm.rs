use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Request body for the FCM HTTP v1 `messages:send` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmSendRequest {
    pub message: FcmMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmMessage {
    pub topic: String,
    pub notification: FcmNotification,
    pub data: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmNotification {
    pub title: String,
    pub body: String,
}

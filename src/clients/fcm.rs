use std::sync::Arc;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use gcp_auth::TokenProvider;
use reqwest::Client;
use tracing::{debug, info};

use crate::{
    config::Config,
    models::fcm::{FcmMessage, FcmSendRequest},
};

const FCM_SCOPES: &[&str] = &["https://www.googleapis.com/auth/firebase.messaging"];

/// Seam between the dispatch logic and the push transport. Tests substitute
/// an in-memory recorder for the real FCM client.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, message: &FcmMessage) -> Result<(), Error>;
}

enum FcmAuth {
    Gcp(Arc<dyn TokenProvider>),
    Static(String),
}

pub struct FcmClient {
    http_client: Client,
    send_url: String,
    auth: FcmAuth,
}

impl FcmClient {
    pub async fn new(config: &Config) -> Result<Self, Error> {
        let provider = gcp_auth::provider().await?;

        info!(project_id = %config.fcm_project_id, "FCM client initialized");

        Ok(Self {
            http_client: Client::new(),
            send_url: format!(
                "https://fcm.googleapis.com/v1/projects/{}/messages:send",
                config.fcm_project_id
            ),
            auth: FcmAuth::Gcp(provider),
        })
    }

    /// Points the client at an FCM-compatible endpoint with a fixed bearer
    /// token, for use against local stubs.
    pub fn with_static_token(send_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            send_url: send_url.into(),
            auth: FcmAuth::Static(token.into()),
        }
    }

    async fn bearer_token(&self) -> Result<String, Error> {
        match &self.auth {
            FcmAuth::Gcp(provider) => {
                let token = provider.token(FCM_SCOPES).await?;
                Ok(token.as_str().to_string())
            }
            FcmAuth::Static(token) => Ok(token.clone()),
        }
    }
}

#[async_trait]
impl MessageSender for FcmClient {
    async fn send(&self, message: &FcmMessage) -> Result<(), Error> {
        let request = FcmSendRequest {
            message: message.clone(),
        };

        let token = self.bearer_token().await?;

        let response = self
            .http_client
            .post(&self.send_url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        if response.status().is_success() {
            debug!(topic = %message.topic, "FCM push notification sent");
            Ok(())
        } else {
            let error_text = response.text().await?;
            Err(anyhow!("FCM request failed: {}", error_text))
        }
    }
}

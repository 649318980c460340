//! Client for the reminder server's push endpoints
use reqwest::Client;

use super::public::SnoozeRequest;
use crate::core::{AppConfig, PushError, page::resolve};
use crate::push::Subscription;

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub vapid_url: String,
    pub subscribe_url: String,
    pub snooze_url: String,
}

impl From<&AppConfig> for Endpoints {
    fn from(config: &AppConfig) -> Self {
        Self {
            vapid_url: resolve(&config.server_url, &config.vapid_path),
            subscribe_url: resolve(&config.server_url, &config.subscribe_path),
            snooze_url: resolve(&config.server_url, &config.snooze_path),
        }
    }
}

/// One attempt per call, no retries and no timeout.
#[derive(Debug, Clone)]
pub struct ServerClient {
    client: Client,
    endpoints: Endpoints,
}

impl ServerClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            client: Client::new(),
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetch the VAPID public key as base64url text.
    pub async fn fetch_vapid_key(&self) -> Result<String, PushError> {
        let key = self
            .client
            .get(&self.endpoints.vapid_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(key)
    }

    /// Register the subscription with the server. Only a failure to
    /// reach the server is an error, the response is ignored.
    pub async fn create_subscription(&self, subscription: &Subscription) -> Result<(), PushError> {
        tracing::debug!("Registering push subscription {}", subscription.endpoint);
        let resp = self
            .client
            .post(&self.endpoints.subscribe_url)
            .header("Content-Type", "application/json")
            .json(subscription)
            .send()
            .await?;
        tracing::debug!("Subscribe responded with {}", resp.status());
        Ok(())
    }

    /// Like `create_subscription`, the response status is not checked.
    pub async fn snooze(&self, endpoint: &str) -> Result<(), PushError> {
        tracing::debug!("Snoozing reminders for {}", endpoint);
        let resp = self
            .client
            .post(&self.endpoints.snooze_url)
            .header("Content-Type", "application/json")
            .json(&SnoozeRequest { endpoint })
            .send()
            .await?;
        tracing::debug!("Snooze responded with {}", resp.status());
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// The client side push credential. Serializes the same way a browser
/// serializes a `PushSubscription` so the server sees an identical
/// request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub endpoint: String,
    #[serde(rename = "expirationTime", default)]
    pub expiration_time: Option<i64>,
    pub keys: SubscriptionKeys,
}

impl Subscription {
    pub fn new(endpoint: &str, p256dh: &str, auth: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            expiration_time: None,
            keys: SubscriptionKeys {
                p256dh: p256dh.to_string(),
                auth: auth.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubscribeOptions {
    // Every push must result in a visible notification
    pub user_visible_only: bool,
    pub application_server_key: Vec<u8>,
}

impl SubscribeOptions {
    pub fn user_visible(application_server_key: Vec<u8>) -> Self {
        Self {
            user_visible_only: true,
            application_server_key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    // The user dismissed the prompt without choosing
    Default,
}

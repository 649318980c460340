//! Push subscription types and the platform's push manager
pub mod key;
pub mod models;
pub use key::url_base64_to_bytes;
pub use models::*;

use async_trait::async_trait;

use crate::core::PushError;

/// Access to the push manager of the background agent's registration.
/// Both the controller and the agent hold one of these and read the
/// subscription independently.
#[async_trait]
pub trait PushManager: Send + Sync {
    /// Whether push messaging is available at all
    fn is_supported(&self) -> bool {
        true
    }

    async fn get_subscription(&self) -> Result<Option<Subscription>, PushError>;

    /// Returns the existing subscription unchanged if there is one.
    async fn subscribe(&self, options: &SubscribeOptions) -> Result<Subscription, PushError>;

    /// Resolves to `false` when the push service refused the
    /// cancellation.
    async fn unsubscribe(&self, subscription: &Subscription) -> Result<bool, PushError>;
}

#[async_trait]
pub trait Permissions: Send + Sync {
    async fn request_permission(&self) -> Permission;
}

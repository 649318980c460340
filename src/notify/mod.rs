pub mod models;
pub use models::*;

use async_trait::async_trait;

use crate::core::PushError;

/// The platform's notification tray as seen from the background agent
#[async_trait]
pub trait NotificationCenter: Send + Sync {
    /// Resolves once the notification is on screen
    async fn show(&self, notification: Notification) -> Result<(), PushError>;

    async fn close(&self, notification: &Notification);
}

/// Window management available to the background agent
#[async_trait]
pub trait Clients: Send + Sync {
    async fn open_window(&self, url: &str) -> Result<(), PushError>;
}

//! Terminal platform used by the `remind` command line. Notifications
//! and alerts are printed, and the current subscription is whatever
//! was saved to a JSON file by the browser or by hand.
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::controller::{Buttons, Page};
use crate::core::PushError;
use crate::notify::{Clients, Notification, NotificationCenter};
use crate::push::{Permission, Permissions, PushManager, SubscribeOptions, Subscription};

pub struct FilePushManager {
    path: PathBuf,
}

impl FilePushManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PushManager for FilePushManager {
    async fn get_subscription(&self) -> Result<Option<Subscription>, PushError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PushError::Subscribe(e.to_string())),
        };
        let subscription = serde_json::from_str(&raw)
            .map_err(|e| PushError::Subscribe(format!("{}: {}", self.path.display(), e)))?;
        Ok(Some(subscription))
    }

    async fn subscribe(&self, _options: &SubscribeOptions) -> Result<Subscription, PushError> {
        // A terminal can't reach a push service, only reuse a saved
        // subscription
        self.get_subscription().await?.ok_or_else(|| {
            PushError::Subscribe(format!(
                "no push service available, save a browser subscription to {}",
                self.path.display()
            ))
        })
    }

    async fn unsubscribe(&self, _subscription: &Subscription) -> Result<bool, PushError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PushError::UnsubscribeFailure(e.to_string())),
        }
    }
}

/// Running a command is taken as consent
pub struct ConsolePermissions;

#[async_trait]
impl Permissions for ConsolePermissions {
    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }
}

pub struct ConsoleNotifications;

#[async_trait]
impl NotificationCenter for ConsoleNotifications {
    async fn show(&self, notification: Notification) -> Result<(), PushError> {
        println!("[{}] {}", notification.title, notification.body);
        for action in notification.actions.iter() {
            println!("  ({}) {}", action.action, action.title);
        }
        Ok(())
    }

    async fn close(&self, notification: &Notification) {
        tracing::debug!("Closed notification {}", notification.title);
    }
}

pub struct ConsoleClients;

#[async_trait]
impl Clients for ConsoleClients {
    async fn open_window(&self, url: &str) -> Result<(), PushError> {
        println!("Open {}", url);
        Ok(())
    }
}

pub struct ConsolePage;

#[async_trait]
impl Page for ConsolePage {
    fn render(&self, buttons: &Buttons) {
        tracing::debug!(
            "Buttons: {:?} (snooze visible: {})",
            buttons.subscribe_label,
            buttons.snooze_visible
        );
    }

    async fn alert(&self, message: &str) {
        println!("{}", message);
    }
}

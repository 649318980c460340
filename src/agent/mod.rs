//! Background notification agent
//!
//! The platform may stop the agent between any two events, so the
//! agent keeps nothing but its configuration. Every handler looks up
//! the current subscription again instead of remembering it.
mod runtime;
pub use runtime::{AgentRuntime, EventOutcome, WaitUntil};

use std::sync::Arc;

use crate::api::{Endpoints, ServerClient};
use crate::core::{AppConfig, PushError};
use crate::notify::{
    Clients, Notification, NotificationAction, NotificationCenter, PushPayload, SNOOZE_ACTION,
};
use crate::push::PushManager;

pub const SNOOZE_ERROR_TITLE: &str = "Error while snoozing";

#[derive(Debug)]
pub struct PushEvent {
    pub data: Option<Vec<u8>>,
}

impl PushEvent {
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: Some(data.to_vec()),
        }
    }
}

#[derive(Debug)]
pub struct NotificationClickEvent {
    pub notification: Notification,
    // `None` when the body of the notification was clicked
    pub action: Option<String>,
}

#[derive(Debug)]
pub enum AgentEvent {
    Push(PushEvent),
    NotificationClick(NotificationClickEvent),
}

pub struct Agent {
    push: Arc<dyn PushManager>,
    notifications: Arc<dyn NotificationCenter>,
    clients: Arc<dyn Clients>,
    server: ServerClient,
    default_title: String,
    default_snooze_label: String,
    icon: String,
    root_path: String,
}

impl Agent {
    pub fn new(
        config: &AppConfig,
        push: Arc<dyn PushManager>,
        notifications: Arc<dyn NotificationCenter>,
        clients: Arc<dyn Clients>,
    ) -> Self {
        Self {
            push,
            notifications,
            clients,
            server: ServerClient::new(Endpoints::from(config)),
            default_title: config.default_title.clone(),
            default_snooze_label: config.default_snooze_label.clone(),
            icon: config.icon.clone(),
            root_path: config.root_path.clone(),
        }
    }

    pub async fn handle(&self, event: AgentEvent) -> Result<(), PushError> {
        match event {
            AgentEvent::Push(event) => self.on_push(event).await,
            AgentEvent::NotificationClick(event) => self.on_notification_click(event).await,
        }
    }

    /// Show a reminder for a delivered push message. Resolves once the
    /// notification is displayed.
    pub async fn on_push(&self, event: PushEvent) -> Result<(), PushError> {
        let payload = PushPayload::parse(event.data.as_deref());
        // Empty strings count as missing
        let title = payload
            .title
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.default_title.clone());
        let body = payload.body.unwrap_or_default();
        let actions = vec![NotificationAction {
            action: SNOOZE_ACTION.to_string(),
            title: payload
                .snooze
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| self.default_snooze_label.clone()),
        }];

        tracing::debug!("Showing reminder notification: {}", title);
        self.notifications
            .show(Notification::new(&title, &body, Some(&self.icon), Some(actions)))
            .await
    }

    pub async fn on_notification_click(
        &self,
        event: NotificationClickEvent,
    ) -> Result<(), PushError> {
        self.notifications.close(&event.notification).await;

        if event.action.as_deref() != Some(SNOOZE_ACTION) {
            return self.clients.open_window(&self.root_path).await;
        }

        match self.snooze().await {
            Ok(()) => Ok(()),
            Err(e) => {
                // No page is open to alert, so surface the failure as a
                // notification of its own
                tracing::error!("{}: {}", SNOOZE_ERROR_TITLE, e);
                self.notifications
                    .show(Notification::new(SNOOZE_ERROR_TITLE, &e.to_string(), None, None))
                    .await
            }
        }
    }

    async fn snooze(&self) -> Result<(), PushError> {
        let Some(subscription) = self.push.get_subscription().await? else {
            tracing::debug!("No push subscription, nothing to snooze");
            return Ok(());
        };
        self.server.snooze(&subscription.endpoint).await
    }
}

//! Foreground subscription controller behind the subscribe and snooze
//! buttons
mod state;
pub use state::{Buttons, LifecycleState, SUBSCRIBE_LABEL, UNSUBSCRIBE_LABEL};

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::ServerClient;
use crate::core::PushError;
use crate::push::{
    Permission, Permissions, PushManager, SubscribeOptions, Subscription, url_base64_to_bytes,
};

pub const SUBSCRIBED_MESSAGE: &str = "You are now subscribed to push notifications.";
pub const UNSUBSCRIBED_MESSAGE: &str = "You are now unsubscribed from push notifications.";
pub const SNOOZED_MESSAGE: &str = "Reminder snoozed.";

/// The interactive page the controller reports to
#[async_trait]
pub trait Page: Send + Sync {
    fn render(&self, buttons: &Buttons);

    async fn alert(&self, message: &str);
}

pub struct Controller {
    push: Arc<dyn PushManager>,
    permissions: Arc<dyn Permissions>,
    page: Arc<dyn Page>,
    server: ServerClient,
    state: Mutex<LifecycleState>,
}

impl Controller {
    pub fn new(
        push: Arc<dyn PushManager>,
        permissions: Arc<dyn Permissions>,
        page: Arc<dyn Page>,
        server: ServerClient,
    ) -> Self {
        Self {
            push,
            permissions,
            page,
            server,
            state: Mutex::new(LifecycleState::Unknown),
        }
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, next: LifecycleState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }

    /// Load the current subscription and render the buttons. Makes no
    /// network calls.
    pub async fn initialize(&self) -> LifecycleState {
        if !self.push.is_supported() {
            let current = self.state();
            self.page.render(&current.buttons());
            self.page.alert(&PushError::UnsupportedPlatform.to_string()).await;
            return current;
        }

        let next = match self.read_state().await {
            Ok(next) => next,
            Err(e) => {
                tracing::error!("Failed to read push subscription: {}", e);
                LifecycleState::Unknown
            }
        };
        self.set_state(next);
        self.page.render(&next.buttons());
        tracing::debug!("Subscription controller initialized as {:?}", next);
        next
    }

    async fn read_state(&self) -> Result<LifecycleState, PushError> {
        Ok(match self.push.get_subscription().await? {
            Some(_) => LifecycleState::Subscribed,
            None => LifecycleState::Unsubscribed,
        })
    }

    /// Handle a click on the subscribe button. Failures are reported to
    /// the page and leave the state as it was before the click.
    pub async fn toggle(&self) -> Result<LifecycleState, PushError> {
        // The subscription couldn't be read at load time, try again
        if self.push.is_supported() && self.state() == LifecycleState::Unknown {
            match self.read_state().await {
                Ok(current) => {
                    let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
                    if *state == LifecycleState::Unknown {
                        *state = current;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to read push subscription: {}", e);
                    self.page
                        .alert(&format!("Push subscription failed: {}", e))
                        .await;
                    return Err(e);
                }
            }
        }

        let begun = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            let begun = state.begin_toggle(self.push.is_supported());
            match begun {
                Ok(next) => *state = next,
                Err(ref e) => tracing::warn!("Toggle rejected while {:?}: {}", *state, e),
            }
            begun
        };
        let in_flight = match begun {
            Ok(next) => next,
            // A second click while the first is still running is dropped
            Err(PushError::TransitionInFlight) => return Err(PushError::TransitionInFlight),
            Err(e) => {
                self.page.alert(&e.to_string()).await;
                return Err(e);
            }
        };

        let result = match in_flight {
            LifecycleState::Unsubscribing => self.unsubscribe().await,
            _ => self.subscribe().await.map(|_| ()),
        };

        let settled = in_flight.finish_toggle(result.is_ok());
        self.set_state(settled);
        tracing::debug!("Toggle settled as {:?}", settled);

        match (&result, in_flight) {
            (Ok(()), LifecycleState::Unsubscribing) => {
                self.page.alert(UNSUBSCRIBED_MESSAGE).await;
            }
            (Ok(()), _) => {
                self.page.alert(SUBSCRIBED_MESSAGE).await;
            }
            (Err(PushError::PermissionDenied), _) => {
                self.page
                    .alert(&PushError::PermissionDenied.to_string())
                    .await;
            }
            (Err(e), LifecycleState::Unsubscribing) => {
                tracing::error!("Push unsubscription failed: {}", e);
                self.page
                    .alert(&format!("Push unsubscription failed: {}", e))
                    .await;
            }
            (Err(e), _) => {
                tracing::error!("Push subscription failed: {}", e);
                self.page
                    .alert(&format!("Push subscription failed: {}", e))
                    .await;
            }
        }
        self.page.render(&settled.buttons());

        result.map(|_| settled)
    }

    // The server isn't told about the cancellation. It drops the
    // record when a later delivery to the lapsed endpoint fails.
    async fn unsubscribe(&self) -> Result<(), PushError> {
        let subscription = self
            .push
            .get_subscription()
            .await
            .map_err(|e| PushError::UnsubscribeFailure(e.to_string()))?;
        let Some(subscription) = subscription else {
            return Ok(());
        };

        match self.push.unsubscribe(&subscription).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(PushError::UnsubscribeFailure(
                "the push service refused the cancellation".to_string(),
            )),
            Err(e) => Err(PushError::UnsubscribeFailure(e.to_string())),
        }
    }

    async fn subscribe(&self) -> Result<Subscription, PushError> {
        if self.permissions.request_permission().await != Permission::Granted {
            return Err(PushError::PermissionDenied);
        }

        let vapid_public = self.server.fetch_vapid_key().await?;
        let key = url_base64_to_bytes(vapid_public.trim())?;
        let subscription = self.push.subscribe(&SubscribeOptions::user_visible(key)).await?;
        self.server.create_subscription(&subscription).await?;

        Ok(subscription)
    }

    /// Handle a click on the snooze button. Returns whether a snooze
    /// request was sent. Never changes the lifecycle state.
    pub async fn snooze(&self) -> Result<bool, PushError> {
        let result = match self.push.get_subscription().await {
            Ok(None) => return Ok(false),
            Ok(Some(subscription)) => self.server.snooze(&subscription.endpoint).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                self.page.alert(SNOOZED_MESSAGE).await;
                Ok(true)
            }
            Err(e) => {
                tracing::error!("Error while snoozing: {}", e);
                self.page
                    .alert(&format!("Error while snoozing: {}", e))
                    .await;
                Err(e)
            }
        }
    }
}

//! In-process stand-in for a browser origin registration. Behaves like
//! the real push manager and records every side effect so callers can
//! inspect what happened.
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::controller::{Buttons, Page};
use crate::core::PushError;
use crate::notify::{Clients, Notification, NotificationCenter};
use crate::push::{Permission, Permissions, PushManager, SubscribeOptions, Subscription};

// Uncompressed P-256 public key
const APPLICATION_SERVER_KEY_LEN: usize = 65;

fn locked<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Default)]
pub struct MemoryPushManager {
    unsupported: bool,
    refuse_unsubscribe: AtomicBool,
    fail_next_read: AtomicBool,
    subscription: Mutex<Option<Subscription>>,
    subscribe_calls: AtomicUsize,
    last_key: Mutex<Option<Vec<u8>>>,
}

impl MemoryPushManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unsupported() -> Self {
        Self {
            unsupported: true,
            ..Self::default()
        }
    }

    pub fn with_subscription(subscription: Subscription) -> Self {
        Self {
            subscription: Mutex::new(Some(subscription)),
            ..Self::default()
        }
    }

    /// Make the push service refuse cancellations
    pub fn refuse_unsubscribe(&self) {
        self.refuse_unsubscribe.store(true, Ordering::SeqCst);
    }

    /// Make the next `get_subscription` call fail once
    pub fn fail_next_read(&self) {
        self.fail_next_read.store(true, Ordering::SeqCst);
    }

    pub fn current(&self) -> Option<Subscription> {
        locked(&self.subscription).clone()
    }

    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    /// The application server key passed to the last subscribe call
    pub fn last_key(&self) -> Option<Vec<u8>> {
        locked(&self.last_key).clone()
    }
}

#[async_trait]
impl PushManager for MemoryPushManager {
    fn is_supported(&self) -> bool {
        !self.unsupported
    }

    async fn get_subscription(&self) -> Result<Option<Subscription>, PushError> {
        if self.unsupported {
            return Err(PushError::UnsupportedPlatform);
        }
        if self.fail_next_read.swap(false, Ordering::SeqCst) {
            return Err(PushError::Subscribe("push service unavailable".to_string()));
        }
        Ok(self.current())
    }

    async fn subscribe(&self, options: &SubscribeOptions) -> Result<Subscription, PushError> {
        if self.unsupported {
            return Err(PushError::UnsupportedPlatform);
        }
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        *locked(&self.last_key) = Some(options.application_server_key.clone());

        if !options.user_visible_only {
            return Err(PushError::Subscribe(
                "push subscriptions must be visible to the user".to_string(),
            ));
        }
        let key = &options.application_server_key;
        if key.len() != APPLICATION_SERVER_KEY_LEN || key[0] != 0x04 {
            return Err(PushError::Subscribe(
                "The provided applicationServerKey is not valid.".to_string(),
            ));
        }

        let mut current = locked(&self.subscription);
        if let Some(existing) = current.as_ref() {
            return Ok(existing.clone());
        }
        let id = Uuid::new_v4().simple().to_string();
        let subscription = Subscription::new(
            &format!("https://push.example.test/send/{}", id),
            &format!("p256dh-{}", id),
            &format!("auth-{}", &id[..8]),
        );
        *current = Some(subscription.clone());
        Ok(subscription)
    }

    async fn unsubscribe(&self, subscription: &Subscription) -> Result<bool, PushError> {
        if self.refuse_unsubscribe.load(Ordering::SeqCst) {
            return Ok(false);
        }
        let mut current = locked(&self.subscription);
        match current.as_ref() {
            Some(existing) if existing.endpoint == subscription.endpoint => {
                *current = None;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Answers every permission prompt the same way. A gated prompt waits
/// until the gate is opened, like a user who hasn't clicked yet.
pub struct MemoryPermissions {
    answer: Permission,
    gate: Option<Arc<Notify>>,
    requests: AtomicUsize,
}

impl MemoryPermissions {
    pub fn new(answer: Permission) -> Self {
        Self {
            answer,
            gate: None,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn gated(answer: Permission) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let permissions = Self {
            answer,
            gate: Some(Arc::clone(&gate)),
            requests: AtomicUsize::new(0),
        };
        (permissions, gate)
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Permissions for MemoryPermissions {
    async fn request_permission(&self) -> Permission {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.answer
    }
}

#[derive(Default)]
pub struct MemoryNotifications {
    fail_show: bool,
    shown: Mutex<Vec<Notification>>,
    closed: Mutex<Vec<Notification>>,
}

impl MemoryNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notification tray that refuses to display anything
    pub fn failing() -> Self {
        Self {
            fail_show: true,
            ..Self::default()
        }
    }

    pub fn shown(&self) -> Vec<Notification> {
        locked(&self.shown).clone()
    }

    pub fn closed(&self) -> Vec<Notification> {
        locked(&self.closed).clone()
    }
}

#[async_trait]
impl NotificationCenter for MemoryNotifications {
    async fn show(&self, notification: Notification) -> Result<(), PushError> {
        if self.fail_show {
            return Err(PushError::Notification(
                "notification permission was revoked".to_string(),
            ));
        }
        locked(&self.shown).push(notification);
        Ok(())
    }

    async fn close(&self, notification: &Notification) {
        locked(&self.closed).push(notification.clone());
    }
}

#[derive(Default)]
pub struct MemoryClients {
    opened: Mutex<Vec<String>>,
}

impl MemoryClients {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        locked(&self.opened).clone()
    }
}

#[async_trait]
impl Clients for MemoryClients {
    async fn open_window(&self, url: &str) -> Result<(), PushError> {
        locked(&self.opened).push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPage {
    alerts: Mutex<Vec<String>>,
    rendered: Mutex<Vec<Buttons>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        locked(&self.alerts).clone()
    }

    /// The most recently rendered buttons
    pub fn buttons(&self) -> Option<Buttons> {
        locked(&self.rendered).last().copied()
    }

    pub fn renders(&self) -> usize {
        locked(&self.rendered).len()
    }
}

#[async_trait]
impl Page for MemoryPage {
    fn render(&self, buttons: &Buttons) {
        locked(&self.rendered).push(*buttons);
    }

    async fn alert(&self, message: &str) {
        locked(&self.alerts).push(message.to_string());
    }
}

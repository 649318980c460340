use std::sync::Arc;

use anyhow::{Result, anyhow};

use crate::agent::{
    Agent, AgentEvent, AgentRuntime, EventOutcome, NotificationClickEvent, PushEvent,
};
use crate::core::AppConfig;
use crate::notify::{Notification, NotificationAction, SNOOZE_ACTION};
use crate::platform::console::{ConsoleClients, ConsoleNotifications, FilePushManager};

fn agent(config: &AppConfig) -> Agent {
    Agent::new(
        config,
        Arc::new(FilePushManager::new(&config.subscription_path)),
        Arc::new(ConsoleNotifications),
        Arc::new(ConsoleClients),
    )
}

async fn deliver(config: &AppConfig, event: AgentEvent) -> Result<()> {
    let runtime = AgentRuntime::spawn(agent(config));
    let outcome = runtime.dispatch(event).settled().await;
    runtime.shutdown().await;

    match outcome {
        EventOutcome::Completed => Ok(()),
        EventOutcome::Failed(e) => Err(anyhow!(e)),
    }
}

pub async fn push(config: &AppConfig, payload: Option<String>) -> Result<()> {
    let event = PushEvent {
        data: payload.map(String::into_bytes),
    };
    deliver(config, AgentEvent::Push(event)).await
}

pub async fn click(config: &AppConfig, action: Option<String>) -> Result<()> {
    // The agent only needs to know which reminder to close
    let notification = Notification::new(
        &config.default_title,
        "",
        Some(&config.icon),
        Some(vec![NotificationAction {
            action: SNOOZE_ACTION.to_string(),
            title: config.default_snooze_label.clone(),
        }]),
    );
    let event = NotificationClickEvent {
        notification,
        action,
    };
    deliver(config, AgentEvent::NotificationClick(event)).await
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::{Endpoints, ServerClient};
use crate::controller::Controller;
use crate::core::{AppConfig, PageData, PushError};
use crate::platform::console::{ConsolePage, ConsolePermissions, FilePushManager};

async fn controller(config: &AppConfig, page_data: Option<PathBuf>) -> Result<Controller> {
    let endpoints = match page_data {
        Some(path) => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read page data {}", path.display()))?;
            PageData::from_json(&raw)?.endpoints(config)
        }
        None => Endpoints::from(config),
    };

    let controller = Controller::new(
        Arc::new(FilePushManager::new(&config.subscription_path)),
        Arc::new(ConsolePermissions),
        Arc::new(ConsolePage),
        ServerClient::new(endpoints),
    );
    controller.initialize().await;
    Ok(controller)
}

pub async fn status(config: &AppConfig, page_data: Option<PathBuf>) -> Result<()> {
    let controller = controller(config, page_data).await?;
    let buttons = controller.state().buttons();
    println!("{:?}: {}", controller.state(), buttons.subscribe_label);
    Ok(())
}

pub async fn toggle(config: &AppConfig, page_data: Option<PathBuf>) -> Result<()> {
    let controller = controller(config, page_data).await?;
    match controller.toggle().await {
        Ok(_) | Err(PushError::TransitionInFlight) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

pub async fn snooze(config: &AppConfig, page_data: Option<PathBuf>) -> Result<()> {
    let controller = controller(config, page_data).await?;
    if !controller.snooze().await? {
        println!("No subscription to snooze");
    }
    Ok(())
}

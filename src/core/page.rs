//! Data injected into the page alongside the subscribe and snooze
//! buttons
use serde::Deserialize;
use serde_json::Value;

use super::AppConfig;
use crate::api::Endpoints;

#[derive(Debug, Clone, Deserialize)]
pub struct PageData {
    // Chart series are rendered elsewhere and carried through untouched
    #[serde(default)]
    pub labels: Vec<Value>,
    #[serde(default)]
    pub temps: Vec<Value>,
    #[serde(default)]
    pub weights: Vec<Value>,
    pub vapid_url: String,
    pub subscribe_url: String,
    pub snooze_url: String,
}

impl PageData {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Resolve the page's endpoint addresses against the server. Paths
    /// that are already absolute URLs are used as is.
    pub fn endpoints(&self, config: &AppConfig) -> Endpoints {
        Endpoints {
            vapid_url: resolve(&config.server_url, &self.vapid_url),
            subscribe_url: resolve(&config.server_url, &self.subscribe_url),
            snooze_url: resolve(&config.server_url, &self.snooze_url),
        }
    }
}

pub(crate) fn resolve(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

use serde::{Deserialize, Serialize};

pub const SNOOZE_ACTION: &str = "snooze";

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    pub fn new(title: &str, body: &str, icon: Option<&str>, actions: Option<Vec<NotificationAction>>) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            icon: icon.map(|s| s.to_string()),
            actions: actions.unwrap_or_default(),
        }
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a.action == action)
    }
}

/// Body of a push message as sent by the server. Every field is
/// optional and unknown fields are ignored.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct PushPayload {
    pub title: Option<String>,
    pub body: Option<String>,
    pub snooze: Option<String>,
}

impl PushPayload {
    /// Parse the raw push data. Anything that isn't a JSON object
    /// falls back to the defaults.
    pub fn parse(data: Option<&[u8]>) -> Self {
        let Some(data) = data else {
            return Self::default();
        };
        match serde_json::from_slice(data) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Ignoring malformed push payload: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_full_payload() {
        let raw = br#"{"title":"Log your weight","body":"Monday reminder","snooze":"Later"}"#;
        let payload = PushPayload::parse(Some(raw));
        assert_eq!(payload.title.as_deref(), Some("Log your weight"));
        assert_eq!(payload.body.as_deref(), Some("Monday reminder"));
        assert_eq!(payload.snooze.as_deref(), Some("Later"));
    }

    #[test]
    fn it_ignores_unknown_fields() {
        let payload = PushPayload::parse(Some(br#"{"title":"Hi","url":"/chat/1"}"#));
        assert_eq!(payload.title.as_deref(), Some("Hi"));
        assert!(payload.body.is_none());
    }

    #[test]
    fn it_defaults_missing_or_malformed_data() {
        assert!(PushPayload::parse(None).title.is_none());
        assert!(PushPayload::parse(Some(b"not json")).title.is_none());
    }

    #[test]
    fn it_skips_missing_icon_when_serialized() {
        let notification = Notification::new("Reminder", "", None, None);
        let value = serde_json::to_value(&notification).unwrap();
        assert!(value.get("icon").is_none());
        assert!(!notification.has_action(SNOOZE_ACTION));
    }
}

use thiserror::Error;

/// Everything that can go wrong while managing a push subscription or
/// handling an agent event. None of these are fatal to the component
/// that raised them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PushError {
    #[error("Push Notifications are not supported by this browser.")]
    UnsupportedPlatform,

    #[error("Push Notifications permission was denied.")]
    PermissionDenied,

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    UnsubscribeFailure(String),

    #[error("invalid application server key: {0}")]
    KeyDecode(String),

    #[error("{0}")]
    Subscribe(String),

    #[error("{0}")]
    Notification(String),

    #[error("a subscription change is already in progress")]
    TransitionInFlight,

    #[error("subscription state has not been loaded yet")]
    NotReady,
}

impl From<reqwest::Error> for PushError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

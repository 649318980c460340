use crate::core::PushError;

pub const SUBSCRIBE_LABEL: &str = "Enable reminder notifications";
pub const UNSUBSCRIBE_LABEL: &str = "Unsubscribe from reminders";

/// Where the foreground page is in the subscription lifecycle.
/// `Subscribing` and `Unsubscribing` mean a toggle is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unknown,
    Unsubscribed,
    Subscribing,
    Subscribed,
    Unsubscribing,
}

impl LifecycleState {
    pub fn is_subscribed(&self) -> bool {
        matches!(self, Self::Subscribed)
    }

    /// The in-flight state a toggle moves to, or why a toggle isn't
    /// allowed from here.
    pub fn begin_toggle(self, supported: bool) -> Result<Self, PushError> {
        match self {
            Self::Subscribed => Ok(Self::Unsubscribing),
            Self::Unsubscribed => Ok(Self::Subscribing),
            Self::Subscribing | Self::Unsubscribing => Err(PushError::TransitionInFlight),
            Self::Unknown if !supported => Err(PushError::UnsupportedPlatform),
            Self::Unknown => Err(PushError::NotReady),
        }
    }

    /// Settled state once the in-flight toggle finishes
    pub fn finish_toggle(self, succeeded: bool) -> Self {
        match (self, succeeded) {
            (Self::Subscribing, true) | (Self::Unsubscribing, false) => Self::Subscribed,
            (Self::Subscribing, false) | (Self::Unsubscribing, true) => Self::Unsubscribed,
            (other, _) => other,
        }
    }

    pub fn buttons(&self) -> Buttons {
        let subscribed = self.is_subscribed();
        Buttons {
            subscribe_label: if subscribed {
                UNSUBSCRIBE_LABEL
            } else {
                SUBSCRIBE_LABEL
            },
            snooze_visible: subscribed,
        }
    }
}

/// What the subscribe and snooze buttons should look like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buttons {
    pub subscribe_label: &'static str,
    pub snooze_visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_only_toggles_from_settled_states() {
        use LifecycleState::*;
        assert_eq!(Subscribed.begin_toggle(true), Ok(Unsubscribing));
        assert_eq!(Unsubscribed.begin_toggle(true), Ok(Subscribing));
        assert_eq!(Subscribing.begin_toggle(true), Err(PushError::TransitionInFlight));
        assert_eq!(Unsubscribing.begin_toggle(true), Err(PushError::TransitionInFlight));
        assert_eq!(Unknown.begin_toggle(true), Err(PushError::NotReady));
        assert_eq!(Unknown.begin_toggle(false), Err(PushError::UnsupportedPlatform));
    }

    #[test]
    fn it_rolls_back_failed_toggles() {
        use LifecycleState::*;
        assert_eq!(Subscribing.finish_toggle(true), Subscribed);
        assert_eq!(Subscribing.finish_toggle(false), Unsubscribed);
        assert_eq!(Unsubscribing.finish_toggle(true), Unsubscribed);
        assert_eq!(Unsubscribing.finish_toggle(false), Subscribed);
    }

    #[test]
    fn it_hides_snooze_unless_subscribed() {
        let buttons = LifecycleState::Subscribed.buttons();
        assert_eq!(buttons.subscribe_label, UNSUBSCRIBE_LABEL);
        assert!(buttons.snooze_visible);

        for state in [LifecycleState::Unknown, LifecycleState::Unsubscribed] {
            let buttons = state.buttons();
            assert_eq!(buttons.subscribe_label, SUBSCRIBE_LABEL);
            assert!(!buttons.snooze_visible);
        }
    }
}

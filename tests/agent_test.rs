//! Integration tests for the background notification agent

mod test_utils;

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use remind::agent::{
        AgentEvent, AgentRuntime, EventOutcome, NotificationClickEvent, PushEvent,
        SNOOZE_ERROR_TITLE,
    };
    use remind::notify::{Notification, NotificationAction, SNOOZE_ACTION};
    use remind::platform::memory::{MemoryNotifications, MemoryPushManager};

    use crate::test_utils::{ENDPOINT, existing_subscription, test_agent};

    fn reminder() -> Notification {
        Notification::new(
            "Log your weight",
            "Monday reminder",
            Some("/static/temps/icon.svg"),
            Some(vec![NotificationAction {
                action: SNOOZE_ACTION.to_string(),
                title: "Later".to_string(),
            }]),
        )
    }

    fn click(action: Option<&str>) -> NotificationClickEvent {
        NotificationClickEvent {
            notification: reminder(),
            action: action.map(|a| a.to_string()),
        }
    }

    /// Tests a delivered payload is shown with its title, body and
    /// snooze label
    #[tokio::test]
    async fn it_shows_pushed_reminder() {
        let t = test_agent(
            "http://127.0.0.1:1",
            MemoryPushManager::new(),
            MemoryNotifications::new(),
        );
        let event = PushEvent::new(
            br#"{"title":"Log your weight","body":"Monday reminder","snooze":"Later"}"#,
        );

        t.agent.on_push(event).await.unwrap();

        assert_eq!(t.notifications.shown(), vec![reminder()]);
    }

    #[tokio::test]
    async fn it_fills_in_defaults() {
        let t = test_agent(
            "http://127.0.0.1:1",
            MemoryPushManager::new(),
            MemoryNotifications::new(),
        );

        t.agent.on_push(PushEvent::new(b"{}")).await.unwrap();
        t.agent.on_push(PushEvent { data: None }).await.unwrap();

        let shown = t.notifications.shown();
        assert_eq!(shown.len(), 2);
        for notification in shown {
            assert_eq!(notification.title, "Reminder");
            assert_eq!(notification.body, "");
            assert_eq!(notification.actions.len(), 1);
            assert_eq!(notification.actions[0].action, SNOOZE_ACTION);
            assert_eq!(notification.actions[0].title, "Snooze until 19:00");
        }
    }

    /// Tests empty strings in the payload fall back to the defaults
    #[tokio::test]
    async fn it_replaces_empty_title_and_label() {
        let t = test_agent(
            "http://127.0.0.1:1",
            MemoryPushManager::new(),
            MemoryNotifications::new(),
        );

        t.agent
            .on_push(PushEvent::new(br#"{"title":"","body":"x","snooze":""}"#))
            .await
            .unwrap();

        let shown = t.notifications.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Reminder");
        assert_eq!(shown[0].body, "x");
        assert_eq!(shown[0].actions[0].title, "Snooze until 19:00");
    }

    /// Tests clicking the notification body closes it and opens the
    /// app without snoozing
    #[tokio::test]
    async fn it_opens_root_on_body_click() {
        let mut server = mockito::Server::new_async().await;
        let snooze = server
            .mock("POST", "/snooze")
            .expect(0)
            .create_async()
            .await;
        let t = test_agent(
            &server.url(),
            MemoryPushManager::with_subscription(existing_subscription()),
            MemoryNotifications::new(),
        );

        t.agent.on_notification_click(click(None)).await.unwrap();

        assert_eq!(t.notifications.closed(), vec![reminder()]);
        assert_eq!(t.clients.opened(), vec!["/"]);
        snooze.assert_async().await;
    }

    #[tokio::test]
    async fn it_snoozes_from_action() {
        let mut server = mockito::Server::new_async().await;
        let snooze = server
            .mock("POST", "/snooze")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({"endpoint": ENDPOINT})))
            .with_status(200)
            .with_body(r#"{"status": "ok"}"#)
            .create_async()
            .await;
        let t = test_agent(
            &server.url(),
            MemoryPushManager::with_subscription(existing_subscription()),
            MemoryNotifications::new(),
        );

        t.agent
            .on_notification_click(click(Some(SNOOZE_ACTION)))
            .await
            .unwrap();

        assert_eq!(t.notifications.closed(), vec![reminder()]);
        assert!(t.notifications.shown().is_empty());
        assert!(t.clients.opened().is_empty());
        snooze.assert_async().await;
    }

    /// Tests the snooze action does nothing once the subscription is
    /// gone
    #[tokio::test]
    async fn it_skips_snooze_without_subscription() {
        let mut server = mockito::Server::new_async().await;
        let snooze = server
            .mock("POST", "/snooze")
            .expect(0)
            .create_async()
            .await;
        let t = test_agent(&server.url(), MemoryPushManager::new(), MemoryNotifications::new());

        t.agent
            .on_notification_click(click(Some(SNOOZE_ACTION)))
            .await
            .unwrap();

        assert_eq!(t.notifications.closed().len(), 1);
        assert!(t.notifications.shown().is_empty());
        snooze.assert_async().await;
    }

    /// Tests an error status from the server is not treated as a
    /// failed snooze
    #[tokio::test]
    async fn it_ignores_snooze_error_status() {
        let mut server = mockito::Server::new_async().await;
        let snooze = server
            .mock("POST", "/snooze")
            .with_status(500)
            .create_async()
            .await;
        let t = test_agent(
            &server.url(),
            MemoryPushManager::with_subscription(existing_subscription()),
            MemoryNotifications::new(),
        );

        t.agent
            .on_notification_click(click(Some(SNOOZE_ACTION)))
            .await
            .unwrap();

        assert!(t.notifications.shown().is_empty());
        snooze.assert_async().await;
    }

    /// Tests a failed snooze is surfaced as a new notification since
    /// no page may be open
    #[tokio::test]
    async fn it_notifies_snooze_failure() {
        let t = test_agent(
            "http://127.0.0.1:1",
            MemoryPushManager::with_subscription(existing_subscription()),
            MemoryNotifications::new(),
        );

        t.agent
            .on_notification_click(click(Some(SNOOZE_ACTION)))
            .await
            .unwrap();

        let shown = t.notifications.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, SNOOZE_ERROR_TITLE);
        assert!(!shown[0].body.is_empty());
    }

    /// Tests the runtime only signals completion after the
    /// notification is shown
    #[tokio::test]
    async fn it_settles_dispatched_events() {
        let t = test_agent(
            "http://127.0.0.1:1",
            MemoryPushManager::new(),
            MemoryNotifications::new(),
        );
        let notifications = t.notifications.clone();
        let clients = t.clients.clone();
        let runtime = AgentRuntime::spawn(t.agent);

        let pushed = runtime.dispatch(AgentEvent::Push(PushEvent::new(
            br#"{"title":"Temperature reminder"}"#,
        )));
        assert_eq!(pushed.settled().await, EventOutcome::Completed);
        assert_eq!(notifications.shown()[0].title, "Temperature reminder");

        let clicked = runtime.dispatch(AgentEvent::NotificationClick(click(None)));
        assert_eq!(clicked.settled().await, EventOutcome::Completed);
        assert_eq!(clients.opened(), vec!["/"]);

        runtime.shutdown().await;
    }

    /// Tests a failing handler is reported without affecting other
    /// events
    #[tokio::test]
    async fn it_isolates_failed_events() {
        let t = test_agent(
            "http://127.0.0.1:1",
            MemoryPushManager::new(),
            MemoryNotifications::failing(),
        );
        let clients = t.clients.clone();
        let runtime = AgentRuntime::spawn(t.agent);

        let pushed = runtime.dispatch(AgentEvent::Push(PushEvent::new(b"{}")));
        let clicked = runtime.dispatch(AgentEvent::NotificationClick(click(None)));

        assert!(matches!(pushed.settled().await, EventOutcome::Failed(_)));
        assert_eq!(clicked.settled().await, EventOutcome::Completed);
        assert_eq!(clients.opened(), vec!["/"]);

        runtime.shutdown().await;
    }

    /// Tests shutdown waits for every in-flight event
    #[tokio::test]
    async fn it_drains_events_on_shutdown() {
        let t = test_agent(
            "http://127.0.0.1:1",
            MemoryPushManager::new(),
            MemoryNotifications::new(),
        );
        let notifications = t.notifications.clone();
        let runtime = AgentRuntime::spawn(t.agent);

        let pending = (0..5)
            .map(|i| {
                let payload = format!(r#"{{"title":"Reminder {}"}}"#, i);
                runtime.dispatch(AgentEvent::Push(PushEvent::new(payload.as_bytes())))
            })
            .collect::<Vec<_>>();
        runtime.shutdown().await;

        assert_eq!(notifications.shown().len(), 5);
        for wait in pending {
            assert_eq!(wait.settled().await, EventOutcome::Completed);
        }
    }
}

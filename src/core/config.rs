use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_url: String,
    pub vapid_path: String,
    pub subscribe_path: String,
    pub snooze_path: String,
    pub root_path: String,
    pub icon: String,
    pub default_title: String,
    pub default_snooze_label: String,
    pub subscription_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let host = "127.0.0.1";
        let port = "8000";
        let server_url =
            env::var("REMIND_SERVER_URL").unwrap_or(format!("http://{}:{}", host, port));
        let vapid_path = env::var("REMIND_VAPID_PATH").unwrap_or("/vapid_public".to_string());
        let subscribe_path =
            env::var("REMIND_SUBSCRIBE_PATH").unwrap_or("/subscribe".to_string());
        let snooze_path = env::var("REMIND_SNOOZE_PATH").unwrap_or("/snooze".to_string());
        let root_path = env::var("REMIND_ROOT_PATH").unwrap_or("/".to_string());
        let icon = env::var("REMIND_ICON").unwrap_or_else(|_| "/static/temps/icon.svg".to_string());
        let default_snooze_label = env::var("REMIND_SNOOZE_LABEL")
            .unwrap_or_else(|_| "Snooze until 19:00".to_string());
        let subscription_path = env::var("REMIND_SUBSCRIPTION_PATH")
            .unwrap_or_else(|_| "./subscription.json".to_string());

        Self {
            server_url,
            vapid_path,
            subscribe_path,
            snooze_path,
            root_path,
            icon,
            default_title: String::from("Reminder"),
            default_snooze_label,
            subscription_path,
        }
    }
}

impl AppConfig {
    /// Config pointing every endpoint at `server_url` with the stock
    /// paths, ignoring the environment.
    pub fn for_server(server_url: &str) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            vapid_path: String::from("/vapid_public"),
            subscribe_path: String::from("/subscribe"),
            snooze_path: String::from("/snooze"),
            root_path: String::from("/"),
            icon: String::from("/static/temps/icon.svg"),
            default_title: String::from("Reminder"),
            default_snooze_label: String::from("Snooze until 19:00"),
            subscription_path: String::from("./subscription.json"),
        }
    }
}

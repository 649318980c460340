//! Test utilities for integration tests
#![allow(dead_code)]
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread::JoinHandle;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use remind::agent::Agent;
use remind::api::{Endpoints, ServerClient};
use remind::controller::Controller;
use remind::core::AppConfig;
use remind::platform::memory::{
    MemoryClients, MemoryNotifications, MemoryPage, MemoryPermissions, MemoryPushManager,
};
use remind::push::Subscription;

pub const ENDPOINT: &str = "https://push.example.test/send/existing";

/// Raw bytes of an uncompressed P-256 public key
pub fn vapid_key_bytes() -> Vec<u8> {
    let mut key = vec![0x04];
    key.extend((1..=64u8).map(|i| i.wrapping_mul(53)));
    key
}

/// The key the way the server hands it out
pub fn vapid_key_text() -> String {
    URL_SAFE_NO_PAD.encode(vapid_key_bytes())
}

pub fn existing_subscription() -> Subscription {
    Subscription::new(ENDPOINT, "test-p256dh-key", "test-auth-key")
}

/// A server that hangs up on the first connection and answers the
/// second with a 200. Returns its URL and a handle yielding the body
/// of the answered request.
pub fn flaky_server() -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let handle = std::thread::spawn(move || {
        let (first, _) = listener.accept().unwrap();
        drop(first);

        let (stream, _) = listener.accept().unwrap();
        let body = read_request_body(&stream);
        (&stream)
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
            .unwrap();
        body
    });
    (url, handle)
}

fn read_request_body(stream: &TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut len = 0;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        if line.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                len = value.trim().parse().unwrap();
            }
        }
    }
    let mut body = vec![0; len];
    reader.read_exact(&mut body).unwrap();
    String::from_utf8(body).unwrap()
}

pub struct TestPage {
    pub push: Arc<MemoryPushManager>,
    pub permissions: Arc<MemoryPermissions>,
    pub page: Arc<MemoryPage>,
    pub controller: Arc<Controller>,
}

/// Builds a controller on top of the in-memory platform talking to
/// the server at `server_url`.
pub fn test_page(
    server_url: &str,
    push: MemoryPushManager,
    permissions: MemoryPermissions,
) -> TestPage {
    test_page_with(
        Endpoints::from(&AppConfig::for_server(server_url)),
        Arc::new(push),
        permissions,
    )
}

/// Like `test_page` but with explicit endpoints and a push manager
/// that may be shared with another page
pub fn test_page_with(
    endpoints: Endpoints,
    push: Arc<MemoryPushManager>,
    permissions: MemoryPermissions,
) -> TestPage {
    let permissions = Arc::new(permissions);
    let page = Arc::new(MemoryPage::new());
    let controller = Arc::new(Controller::new(
        push.clone(),
        permissions.clone(),
        page.clone(),
        ServerClient::new(endpoints),
    ));
    TestPage {
        push,
        permissions,
        page,
        controller,
    }
}

pub struct TestAgent {
    pub push: Arc<MemoryPushManager>,
    pub notifications: Arc<MemoryNotifications>,
    pub clients: Arc<MemoryClients>,
    pub agent: Agent,
}

pub fn test_agent(
    server_url: &str,
    push: MemoryPushManager,
    notifications: MemoryNotifications,
) -> TestAgent {
    let push = Arc::new(push);
    let notifications = Arc::new(notifications);
    let clients = Arc::new(MemoryClients::new());
    let agent = Agent::new(
        &AppConfig::for_server(server_url),
        push.clone(),
        notifications.clone(),
        clients.clone(),
    );
    TestAgent {
        push,
        notifications,
        clients,
        agent,
    }
}

//! Shared utilities for integration tests.

use std::sync::Arc;
use std::time::Duration;

use restaurants::config::AppConfig;
use restaurants::{HttpServer, RestaurantStore, Shutdown};
use tokio::net::TcpListener;

/// A server running on an ephemeral port.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server backed by `store` with the given configuration.
pub async fn start_server(mut config: AppConfig, store: Arc<dyn RestaurantStore>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.listener();
    let server = HttpServer::new(config, store);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Redirects are asserted on, not followed
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    TestServer {
        base_url: format!("http://{}", addr),
        client,
        shutdown,
    }
}

/// Location header of a redirect response.
#[allow(dead_code)]
pub fn location(res: &reqwest::Response) -> &str {
    res.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

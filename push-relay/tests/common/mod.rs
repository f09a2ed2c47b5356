use push_relay::config::{FcmConfig, RelayConfig};
use push_relay::startup::Application;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use wiremock::MockServer;

pub const TEST_SERVER_KEY: &str = "test-server-key";

pub struct TestApp {
    pub address: String,
    pub gateway: MockServer,
}

impl TestApp {
    /// Spawn the relay against a fresh mock FCM gateway.
    pub async fn spawn() -> Self {
        let gateway = MockServer::start().await;
        let gateway_url = format!("{}/fcm/send", gateway.uri());
        Self::spawn_with_gateway_url(gateway, gateway_url, TEST_SERVER_KEY).await
    }

    /// Spawn the relay pointing at an arbitrary gateway URL.
    pub async fn spawn_with_gateway_url(
        gateway: MockServer,
        gateway_url: String,
        server_key: &str,
    ) -> Self {
        // Use random port for testing (port 0)
        let config = RelayConfig {
            common: CoreConfig {
                port: 0,
                environment: "test".to_string(),
                log_level: "info".to_string(),
                otlp_endpoint: None,
            },
            fcm: FcmConfig {
                gateway_url,
                server_key: Secret::new(server_key.to_string()),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            gateway,
        }
    }

    pub async fn post_notification(&self, body: String) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/send-fcm-notification", self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

//! SkyDesk integration test harness.
//!
//! Every test starts its own server on an OS-assigned loopback port and
//! talks to it over real HTTP. Servers are independent, so tests can run
//! in parallel.
//!
//!   cargo test --test integration

mod scenarios;

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use skydesk_api::ApiState;
use skydesk_core::DeviceRegistry;

// ── Harness ───────────────────────────────────────────────────────────────────

/// A running server. Shuts down when dropped.
pub struct TestServer {
    pub base: String,
    pub registry: DeviceRegistry,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Start a server with default settings.
pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(false).await
}

/// Start a server, optionally echoing raw parse errors.
pub async fn spawn_server_with(expose_internal_errors: bool) -> Result<TestServer> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;

    let registry = DeviceRegistry::new();
    let state = ApiState {
        registry: registry.clone(),
        expose_internal_errors,
    };

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = skydesk_api::serve(listener, state, async move {
            let _ = rx.await;
        })
        .await;
    });

    Ok(TestServer {
        base: format!("http://{addr}"),
        registry,
        shutdown: Some(tx),
    })
}

impl TestServer {
    pub async fn get(&self, path: &str) -> Result<(u16, Value)> {
        let resp = reqwest::get(format!("{}{}", self.base, path))
            .await
            .with_context(|| format!("GET {path} failed"))?;
        decode(resp).await
    }

    pub async fn post(&self, path: &str, body: &str) -> Result<(u16, Value)> {
        let resp = reqwest::Client::new()
            .post(format!("{}{}", self.base, path))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .with_context(|| format!("POST {path} failed"))?;
        decode(resp).await
    }

    pub async fn register(&self, device_id: &str, ip: &str) -> Result<(u16, Value)> {
        let body = serde_json::json!({ "ip": ip }).to_string();
        self.post(&format!("/register/{device_id}"), &body).await
    }
}

async fn decode(resp: reqwest::Response) -> Result<(u16, Value)> {
    let status = resp.status().as_u16();
    let text = resp.text().await.context("failed to read body")?;
    let value = serde_json::from_str(&text)
        .with_context(|| format!("non-JSON body ({status}): {text}"))?;
    Ok((status, value))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_starts_empty() -> Result<()> {
    let server = spawn_server().await?;

    let (status, body) = server.get("/").await?;
    assert_eq!(status, 200);
    assert_eq!(body["active_devices"], 0);

    let (status, body) = server.get("/health").await?;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn test_server_stops_on_shutdown() -> Result<()> {
    let server = spawn_server().await?;
    let base = server.base.clone();
    server.get("/health").await?;

    drop(server);

    let mut refused = false;
    for _ in 0..50 {
        if reqwest::get(format!("{base}/health")).await.is_err() {
            refused = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert!(refused, "server still answering after shutdown");
    Ok(())
}

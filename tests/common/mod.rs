#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use iot_bridge::devserver::{self, DevState};
use iot_bridge::model::ConnectionDescriptor;

pub fn descriptor(database_url: &str, database_path: &str, project_id: &str) -> ConnectionDescriptor {
    ConnectionDescriptor {
        api_key: "k".to_string(),
        database_url: database_url.to_string(),
        project_id: project_id.to_string(),
        database_path: database_path.to_string(),
        ..ConnectionDescriptor::default()
    }
}

/// Emulator running inside the test's own runtime.
pub struct InProcess {
    pub base_url: String,
    pub state: Arc<DevState>,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

impl Drop for InProcess {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn start_devserver() -> Result<InProcess> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind devserver")?;
    let addr = listener.local_addr().context("devserver addr")?;
    let state = DevState::new();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(devserver::serve(listener, state.clone(), async {
        let _ = rx.await;
    }));
    Ok(InProcess {
        base_url: format!("http://{}", addr),
        state,
        shutdown: Some(tx),
    })
}

/// One request as seen by a [`MockServer`].
#[derive(Clone, Debug)]
pub struct Seen {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: String,
}

type Responder = dyn Fn(&Seen) -> (StatusCode, String) + Send + Sync;

/// Catch-all axum server that records requests and answers from a closure.
pub struct MockServer {
    pub base_url: String,
    pub seen: Arc<Mutex<Vec<Seen>>>,
}

impl MockServer {
    pub fn requests(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

pub async fn start_mock(
    respond: impl Fn(&Seen) -> (StatusCode, String) + Send + Sync + 'static,
) -> Result<MockServer> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let respond: Arc<Responder> = Arc::new(respond);

    let log = seen.clone();
    let app = Router::new().fallback(
        move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
            let log = log.clone();
            let respond = respond.clone();
            async move {
                let req = Seen {
                    method,
                    uri: uri.to_string(),
                    headers,
                    body: String::from_utf8_lossy(&body).to_string(),
                };
                let (status, body) = respond(&req);
                log.lock().unwrap().push(req);
                let resp: Response = (
                    status,
                    [(axum::http::header::CONTENT_TYPE, "application/json")],
                    body,
                )
                    .into_response();
                resp
            }
        },
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind mock")?;
    let addr = listener.local_addr().context("mock addr")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(MockServer {
        base_url: format!("http://{}", addr),
        seen,
    })
}

/// Emulator binary running as a child process, for CLI tests.
pub struct ServerGuard {
    pub base_url: String,
    _data_dir: tempfile::TempDir,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn spawn_devserver() -> Result<ServerGuard> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;
    let addr_file = data_dir.path().join("addr.txt");

    let child = Command::new(env!("CARGO_BIN_EXE_iot-bridge-devserver"))
        .args([
            "--addr",
            "127.0.0.1:0",
            "--addr-file",
            addr_file.to_str().context("addr file path")?,
        ])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn iot-bridge-devserver")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        _data_dir: data_dir,
        child,
    })
}

fn read_addr_file(addr_file: &std::path::Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => thread::sleep(Duration::from_millis(25)),
        }
    }
}

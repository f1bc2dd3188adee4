//! In-memory stand-in for the realtime store, speaking the REST and
//! streaming subset the client uses. For offline work and tests.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use serde_json::Value;
use tokio::sync::{RwLock, broadcast};

use crate::realtime::tree::Mirror;

mod handlers;
mod http_error;

pub struct DevState {
    tree: RwLock<Mirror>,
    changes: broadcast::Sender<String>,
}

impl DevState {
    pub fn new() -> Arc<Self> {
        let (changes, _) = broadcast::channel(256);
        Arc::new(Self {
            tree: RwLock::new(Mirror::default()),
            changes,
        })
    }

    pub async fn value_at(&self, path: &str) -> Option<Value> {
        self.tree.read().await.get(path).cloned()
    }

    async fn put(&self, path: &str, data: Value) {
        self.tree.write().await.put(path, data);
        let _ = self.changes.send(path.to_string());
    }

    async fn patch(&self, path: &str, data: Value) {
        self.tree.write().await.patch(path, data);
        let _ = self.changes.send(path.to_string());
    }
}

pub fn router(state: Arc<DevState>) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .fallback(handlers::data)
        .with_state(state)
}

/// Serves until `shutdown` resolves.
pub async fn serve(
    listener: tokio::net::TcpListener,
    state: Arc<DevState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!(%addr, "devserver listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")
}

/// True when a write at `changed` can alter the value seen at `watched`.
fn overlaps(changed: &str, watched: &str) -> bool {
    let is_prefix = |a: &str, b: &str| {
        let a = a.trim_end_matches('/');
        a.is_empty() || b == a || b.starts_with(&format!("{}/", a))
    };
    is_prefix(changed, watched) || is_prefix(watched, changed)
}

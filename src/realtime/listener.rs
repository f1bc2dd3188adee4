use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Deserialize;

use super::Subscription;
use super::http_client::describe_failure;
use super::sse::{SseDecoder, SseEvent};
use super::tree::Mirror;
use crate::error::{BridgeError, BridgeResult};
use crate::model::StoreEvent;

const RECONNECT_DELAY: Duration = Duration::from_secs(3);

/// Body of `put` and `patch` events.
#[derive(Debug, Deserialize)]
struct ChangeBody {
    path: String,
    #[serde(default)]
    data: serde_json::Value,
}

pub(super) fn spawn<F>(
    runtime: &tokio::runtime::Handle,
    client: reqwest::Client,
    url: String,
    on_change: F,
) -> Subscription
where
    F: FnMut(StoreEvent) + Send + 'static,
{
    let active = Arc::new(AtomicBool::new(true));
    let mut listener = Listener {
        active: active.clone(),
        on_change,
        mirror: Mirror::default(),
    };
    let task = runtime.spawn(async move { listener.run(&client, &url).await });
    Subscription::new(move || {
        active.store(false, Ordering::SeqCst);
        task.abort();
        tracing::debug!("subscription released");
    })
}

struct Listener<F> {
    active: Arc<AtomicBool>,
    on_change: F,
    mirror: Mirror,
}

impl<F> Listener<F>
where
    F: FnMut(StoreEvent) + Send + 'static,
{
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn emit(&mut self, event: StoreEvent) {
        if self.is_active() {
            (self.on_change)(event);
        }
    }

    async fn run(&mut self, client: &reqwest::Client, url: &str) {
        loop {
            let outcome = self.stream_once(client, url).await;
            if !self.is_active() {
                return;
            }
            let err = match outcome {
                Ok(()) => BridgeError::Read("stream closed by store".to_string()),
                Err(err) => err,
            };
            tracing::warn!(%url, error = %err, "subscription stream interrupted; reopening");
            self.emit(StoreEvent::ReadError(err.to_string()));
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    }

    async fn stream_once(&mut self, client: &reqwest::Client, url: &str) -> BridgeResult<()> {
        let mut resp = client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(|err| BridgeError::Read(format!("open stream: {}", err)))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BridgeError::Read(describe_failure(status, &body)));
        }

        let mut decoder = SseDecoder::default();
        while let Some(chunk) = resp
            .chunk()
            .await
            .map_err(|err| BridgeError::Read(format!("stream: {}", err)))?
        {
            for event in decoder.feed(&chunk) {
                self.apply(event)?;
            }
        }
        Ok(())
    }

    fn apply(&mut self, event: SseEvent) -> BridgeResult<()> {
        match event.event.as_str() {
            "put" | "patch" => {
                let body: ChangeBody = serde_json::from_str(&event.data).map_err(|err| {
                    BridgeError::Read(format!("malformed {} event: {}", event.event, err))
                })?;
                if event.event == "put" {
                    self.mirror.put(&body.path, body.data);
                } else {
                    self.mirror.patch(&body.path, body.data);
                }
                let value = self.mirror.value().cloned();
                self.emit(StoreEvent::Value(value));
                Ok(())
            }
            "keep-alive" => Ok(()),
            "cancel" => Err(BridgeError::Read(format!(
                "listener cancelled by store: {}",
                event.data.trim_matches('"')
            ))),
            "auth_revoked" => Err(BridgeError::Read("credential expired".to_string())),
            other => {
                tracing::debug!(event = other, "ignoring stream event");
                Ok(())
            }
        }
    }
}

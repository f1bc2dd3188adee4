use std::future::Future;

use crate::error::{BridgeError, BridgeResult};
use crate::model::{ConnectionDescriptor, DbPath, RemoteValue, StoreEvent};

mod http_client;
mod listener;
pub mod sse;
mod subscription;
pub mod tree;

pub use self::subscription::Subscription;

/// A realtime key-value store reachable through one connection handle.
pub trait RealtimeStore: Send + Sync + Sized + 'static {
    /// Opens a handle for `descriptor`. Fails with a configuration error when
    /// the descriptor cannot address a store.
    fn connect(descriptor: &ConnectionDescriptor) -> BridgeResult<Self>;

    /// Overwrites the value at `path`.
    fn write(
        &self,
        path: &DbPath,
        value: &RemoteValue,
    ) -> impl Future<Output = BridgeResult<()>> + Send;

    /// Delivers the current value at `path`, then every change, in order,
    /// until the returned handle is closed.
    fn subscribe<F>(&self, path: &DbPath, on_change: F) -> Subscription
    where
        F: FnMut(StoreEvent) + Send + 'static;
}

/// Store client speaking the realtime database REST and streaming protocol.
#[derive(Clone, Debug)]
pub struct FirebaseStore {
    base_url: String,
    project_id: String,
    client: reqwest::Client,
    runtime: tokio::runtime::Handle,
}

impl FirebaseStore {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }
}

impl RealtimeStore for FirebaseStore {
    fn connect(descriptor: &ConnectionDescriptor) -> BridgeResult<Self> {
        descriptor.validate()?;
        DbPath::parse(&descriptor.database_path)?;

        let base_url = descriptor.database_url.trim().trim_end_matches('/').to_string();
        let parsed = reqwest::Url::parse(&base_url)
            .map_err(|err| BridgeError::config(format!("invalid database URL: {}", err)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BridgeError::config(format!(
                "database URL must be http(s), got {}",
                parsed.scheme()
            )));
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| BridgeError::config("no async runtime available for the store client"))?;

        let client = reqwest::Client::builder()
            .user_agent("iot-bridge")
            .build()
            .map_err(|err| BridgeError::config(format!("build http client: {}", err)))?;

        tracing::info!(project = %descriptor.project_id, url = %base_url, "connected to realtime store");
        Ok(Self {
            base_url,
            project_id: descriptor.project_id.clone(),
            client,
            runtime,
        })
    }

    async fn write(&self, path: &DbPath, value: &RemoteValue) -> BridgeResult<()> {
        let url = path.rest_url(&self.base_url);
        tracing::debug!(%path, kind = value.kind(), "writing value");
        let resp = self
            .client
            .put(&url)
            .json(&value.to_json())
            .send()
            .await
            .map_err(|err| BridgeError::Write(format!("cannot reach store: {}", err)))?;
        http_client::ensure_ok(resp, BridgeError::Write).await?;
        tracing::info!(%path, "value written");
        Ok(())
    }

    fn subscribe<F>(&self, path: &DbPath, on_change: F) -> Subscription
    where
        F: FnMut(StoreEvent) + Send + 'static,
    {
        let url = path.rest_url(&self.base_url);
        tracing::info!(%path, "subscribing");
        listener::spawn(&self.runtime, self.client.clone(), url, on_change)
    }
}

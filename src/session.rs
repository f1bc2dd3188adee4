use std::sync::Arc;

use crate::error::BridgeResult;
use crate::model::{ConnectionDescriptor, DbPath, StoreEvent};
use crate::realtime::{RealtimeStore, Subscription};

type Sink = dyn Fn(u64, StoreEvent) + Send + Sync;

/// Owns the current descriptor, its connection handle and the one live
/// subscription.
///
/// Every event is tagged with the generation of the subscription that
/// produced it; the generation changes on each successful reconfigure, so a
/// consumer can drop anything still queued from a torn-down subscription.
pub struct Session<S: RealtimeStore> {
    descriptor: Option<ConnectionDescriptor>,
    path: Option<DbPath>,
    store: Option<Arc<S>>,
    subscription: Option<Subscription>,
    generation: u64,
    sink: Arc<Sink>,
}

impl<S: RealtimeStore> Session<S> {
    pub fn new(sink: impl Fn(u64, StoreEvent) + Send + Sync + 'static) -> Self {
        Self {
            descriptor: None,
            path: None,
            store: None,
            subscription: None,
            generation: 0,
            sink: Arc::new(sink),
        }
    }

    /// Connects and subscribes in one step.
    pub fn open(
        descriptor: &ConnectionDescriptor,
        sink: impl Fn(u64, StoreEvent) + Send + Sync + 'static,
    ) -> BridgeResult<Self> {
        let mut session = Self::new(sink);
        session.reconfigure(descriptor)?;
        Ok(session)
    }

    /// Points the session at `descriptor`.
    ///
    /// An unchanged descriptor keeps the existing connection and returns
    /// `Ok(false)`. Otherwise the current subscription is released first,
    /// then a new connection and subscription are opened. If connecting
    /// fails the session is left closed.
    pub fn reconfigure(&mut self, descriptor: &ConnectionDescriptor) -> BridgeResult<bool> {
        if self.store.is_some() && self.descriptor.as_ref() == Some(descriptor) {
            return Ok(false);
        }

        self.close();

        let path = DbPath::parse(&descriptor.database_path)?;
        let store = Arc::new(S::connect(descriptor)?);

        self.generation += 1;
        let generation = self.generation;
        let sink = self.sink.clone();
        let subscription = store.subscribe(&path, move |event| sink(generation, event));

        tracing::info!(
            project = %descriptor.project_id,
            %path,
            generation,
            "session configured"
        );
        self.descriptor = Some(descriptor.clone());
        self.path = Some(path);
        self.store = Some(store);
        self.subscription = Some(subscription);
        Ok(true)
    }

    /// Releases the subscription and drops the connection handle.
    pub fn close(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.close();
            tracing::debug!(generation = self.generation, "subscription closed");
        }
        self.store = None;
        self.path = None;
        self.descriptor = None;
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn store(&self) -> Option<Arc<S>> {
        self.store.clone()
    }

    pub fn path(&self) -> Option<&DbPath> {
        self.path.as_ref()
    }

    pub fn descriptor(&self) -> Option<&ConnectionDescriptor> {
        self.descriptor.as_ref()
    }
}

impl<S: RealtimeStore> Drop for Session<S> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;

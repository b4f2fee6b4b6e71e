use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::trace;

use crate::Result;

use super::{CollectionIden, DocBackend, DocCollection};

/// Collection accessor: one handle bound to one backend connection, shared
/// by every store for the process lifetime.
pub struct Store {
    backend: Arc<dyn DocBackend>,
    connected: AtomicBool,
}

impl Store {
    pub fn new(backend: Arc<dyn DocBackend>) -> Self {
        Self {
            backend,
            connected: AtomicBool::new(false),
        }
    }

    pub fn surveys(&self) -> Arc<dyn DocCollection> {
        self.backend.collection(CollectionIden::Surveys)
    }

    pub fn questions(&self) -> Arc<dyn DocCollection> {
        self.backend.collection(CollectionIden::Questions)
    }

    pub fn responses(&self) -> Arc<dyn DocCollection> {
        self.backend.collection(CollectionIden::Responses)
    }

    /// Connects the backend. Idempotent: a second call is a no-op.
    pub async fn connect(&self) -> Result<()> {
        if self.connected.load(Ordering::SeqCst) {
            return Ok(());
        }
        trace!("store::connect");
        self.backend.connect().await?;
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Shuts the backend down. Idempotent: a no-op when not connected.
    pub async fn shutdown(&self) -> Result<()> {
        if !self.connected.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        trace!("store::shutdown");
        self.backend.shutdown().await
    }
}

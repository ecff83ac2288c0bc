use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use showroom_api::{ApiError, CatalogueSource, DocumentSource};
use showroom_core::CatalogueItem;

/// A catalogue source that replays a script of canned responses.
///
/// Clones share the script, so a test can hold one copy and keep pushing
/// responses after the engine has taken ownership of the other.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    inner: Arc<SourceState>,
}

#[derive(Default)]
struct SourceState {
    responses: Mutex<VecDeque<Result<Vec<CatalogueItem>, ApiError>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_items(&self, items: Vec<CatalogueItem>) {
        self.inner.responses.lock().unwrap().push_back(Ok(items));
    }

    pub fn push_failure(&self, error: ApiError) {
        self.inner.responses.lock().unwrap().push_back(Err(error));
    }

    /// How many times the engine has gone to the network.
    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }
}

impl CatalogueSource for ScriptedSource {
    fn fetch_all(&self) -> Result<Vec<CatalogueItem>, ApiError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())))
    }
}

/// A document source that replays canned payloads regardless of URL.
#[derive(Clone, Default)]
pub struct ScriptedDocuments {
    inner: Arc<DocumentState>,
}

#[derive(Default)]
struct DocumentState {
    responses: Mutex<VecDeque<Result<Vec<u8>, ApiError>>>,
    calls: AtomicUsize,
}

impl ScriptedDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_payload(&self, bytes: Vec<u8>) {
        self.inner.responses.lock().unwrap().push_back(Ok(bytes));
    }

    pub fn push_failure(&self, error: ApiError) {
        self.inner.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }
}

impl DocumentSource for ScriptedDocuments {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>, ApiError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())))
    }
}

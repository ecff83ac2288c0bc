use std::collections::HashMap;
use std::sync::Arc;

use showroom_api::{ApiError, DocumentSource};
use tracing::debug;

use crate::error::EngineError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// URL-keyed in-memory cache over a document source. Payloads must carry
/// the PDF magic to be admitted; anything else is rejected and not cached.
pub struct DocumentCache {
    source: Box<dyn DocumentSource>,
    cached: HashMap<String, Arc<Vec<u8>>>,
}

impl DocumentCache {
    pub fn new(source: impl DocumentSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cached: HashMap::new(),
        }
    }

    /// Return the document at `url`, downloading it on first use.
    pub fn fetch(&mut self, url: &str) -> Result<Arc<Vec<u8>>, EngineError> {
        if let Some(bytes) = self.cached.get(url) {
            debug!(url, "document served from cache");
            return Ok(Arc::clone(bytes));
        }

        let bytes = self.source.fetch(url)?;
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(
                ApiError::InvalidDocument(format!("payload from {url} is not a PDF")).into(),
            );
        }

        let bytes = Arc::new(bytes);
        self.cached.insert(url.to_string(), Arc::clone(&bytes));
        Ok(bytes)
    }

    /// Drop one cached document. Returns false when the url was not cached.
    pub fn evict(&mut self, url: &str) -> bool {
        self.cached.remove(url).is_some()
    }

    pub fn cached_count(&self) -> usize {
        self.cached.len()
    }
}

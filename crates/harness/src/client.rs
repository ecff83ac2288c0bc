use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex};

use showroom_core::{CatalogueItem, FieldValue};
use showroom_engine::Engine;
use showroom_storage::{SqliteStore, StorageError};
use tempfile::TempDir;

use crate::source::ScriptedSource;

/// An engine wired to an in-memory store and a scripted remote, with a
/// recorder subscribed so tests can inspect every published snapshot.
pub struct TestClient {
    pub engine: Engine,
    pub remote: ScriptedSource,
    snapshots: Arc<Mutex<Vec<Vec<CatalogueItem>>>>,
}

impl TestClient {
    pub fn new() -> Result<Self, StorageError> {
        let remote = ScriptedSource::new();
        let store = SqliteStore::open_in_memory()?;
        let mut engine = Engine::new(store, remote.clone());

        let snapshots = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&snapshots);
        engine.subscribe(move |items| {
            recorder.lock().unwrap().push(items.to_vec());
        });

        Ok(Self {
            engine,
            remote,
            snapshots,
        })
    }

    /// Every snapshot published so far, oldest first.
    pub fn published(&self) -> Vec<Vec<CatalogueItem>> {
        self.snapshots.lock().unwrap().clone()
    }
}

/// Build a catalogue item with typed fields.
pub fn item(id: &str, name: &str, fields: &[(&str, FieldValue)]) -> CatalogueItem {
    let map: BTreeMap<String, FieldValue> = fields
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
    CatalogueItem::new(id, name, if map.is_empty() { None } else { Some(map) })
}

/// A temp directory plus a database path inside it, for reopen tests.
/// Keep the directory alive for as long as the store file is in use.
pub fn disk_store() -> Result<(TempDir, String), io::Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("showroom.db");
    let path = path
        .to_str()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "non-utf8 temp path"))?
        .to_string();
    Ok((dir, path))
}

pub mod documents;
pub mod error;
pub mod profile;
pub mod snapshot;

pub use documents::DocumentCache;
pub use error::EngineError;
pub use profile::ProfileManager;
pub use snapshot::{SnapshotFeed, SubscriptionId};

use showroom_api::CatalogueSource;
use showroom_core::field_value::{decode_fields, encode_fields};
use showroom_core::{CatalogueItem, ItemDraft, Validation};
use showroom_storage::{CatalogueStore, ItemRecord, SqliteStore};
use tracing::{debug, warn};

pub struct Engine {
    store: SqliteStore,
    source: Box<dyn CatalogueSource>,
    snapshot: Vec<CatalogueItem>,
    feed: SnapshotFeed,
}

impl Engine {
    pub fn new(store: SqliteStore, source: impl CatalogueSource + 'static) -> Self {
        Self {
            store,
            source: Box::new(source),
            snapshot: Vec::new(),
            feed: SnapshotFeed::new(),
        }
    }

    /// The most recently published catalogue.
    pub fn items(&self) -> &[CatalogueItem] {
        &self.snapshot
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    pub fn subscribe(&mut self, callback: impl Fn(&[CatalogueItem]) + 'static) -> SubscriptionId {
        self.feed.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.feed.unsubscribe(id)
    }

    fn publish(&mut self, items: Vec<CatalogueItem>) {
        self.snapshot = items;
        self.feed.emit(&self.snapshot);
    }

    // ========================================================================
    // Catalogue Sync
    // ========================================================================

    /// Load the catalogue and publish a snapshot. Unless `force_update` is
    /// set, a non-empty persisted copy is served without touching the
    /// network. A cache read failure falls back to the network; a network
    /// failure aborts and leaves the last snapshot in place.
    pub fn fetch_catalogue(&mut self, force_update: bool) -> Result<(), EngineError> {
        if !force_update {
            match self.store.fetch_items() {
                Ok(records) if !records.is_empty() => {
                    debug!(rows = records.len(), "serving catalogue from cache");
                    let items = records.into_iter().map(decode_record).collect();
                    self.publish(items);
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "cache read failed, falling back to network");
                }
            }
        }

        let items = self.source.fetch_all()?;
        debug!(count = items.len(), "fetched remote catalogue");

        let records: Vec<ItemRecord> = items.iter().map(encode_record).collect();
        if let Err(e) = self.store.replace_catalogue(&records) {
            warn!(error = %e, "failed to persist catalogue, serving remote copy anyway");
        }

        self.publish(items);
        Ok(())
    }

    /// Drop every cached item and publish an empty snapshot. The next
    /// load goes to the network.
    pub fn delete_catalogue(&mut self) -> Result<(), EngineError> {
        self.store.delete_all_items()?;
        self.publish(Vec::new());
        Ok(())
    }

    // ========================================================================
    // Item Mutation
    // ========================================================================

    /// Persist an edited item and splice it into the published snapshot,
    /// keeping its position. Unknown ids are rejected.
    pub fn save_item(&mut self, item: CatalogueItem) -> Result<(), EngineError> {
        let record = encode_record(&item);
        if !self.store.update_item(&record)? {
            return Err(EngineError::NotFound(item.id));
        }

        if let Some(slot) = self.snapshot.iter_mut().find(|i| i.id == item.id) {
            *slot = item;
            self.feed.emit(&self.snapshot);
        }
        Ok(())
    }

    /// Validate a draft, then save it. An invalid draft is rejected with
    /// the full message list and nothing is written.
    pub fn save_draft(&mut self, draft: &ItemDraft) -> Result<(), EngineError> {
        if let Validation::Invalid(messages) = draft.validate() {
            return Err(EngineError::Invalid(messages));
        }
        self.save_item(draft.build())
    }

    /// Remove one item from the table and the published snapshot.
    pub fn delete_item(&mut self, id: &str) -> Result<(), EngineError> {
        if !self.store.delete_item(id)? {
            return Err(EngineError::NotFound(id.to_string()));
        }
        self.snapshot.retain(|item| item.id != id);
        self.feed.emit(&self.snapshot);
        Ok(())
    }
}

fn decode_record(record: ItemRecord) -> CatalogueItem {
    let fields = record.fields.as_deref().and_then(|blob| match decode_fields(blob) {
        Ok(map) => Some(map),
        Err(e) => {
            warn!(id = %record.id, error = %e, "dropping unreadable field blob");
            None
        }
    });
    CatalogueItem::new(record.id, record.name, fields)
}

fn encode_record(item: &CatalogueItem) -> ItemRecord {
    let fields = item.fields.as_ref().and_then(|map| match encode_fields(map) {
        Ok(blob) => Some(blob),
        Err(e) => {
            warn!(id = %item.id, error = %e, "storing item without its field blob");
            None
        }
    });
    ItemRecord {
        id: item.id.clone(),
        name: item.name.clone(),
        fields,
    }
}

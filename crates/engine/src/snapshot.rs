use showroom_core::CatalogueItem;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

type Callback = Box<dyn Fn(&[CatalogueItem])>;

/// Fan-out point for catalogue snapshots. Subscribers are invoked
/// synchronously, in subscription order, each time a snapshot publishes.
#[derive(Default)]
pub struct SnapshotFeed {
    subscribers: Vec<(SubscriptionId, Callback)>,
}

impl SnapshotFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl Fn(&[CatalogueItem]) + 'static) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false when the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() < before
    }

    pub fn emit(&self, items: &[CatalogueItem]) {
        for (_, callback) in &self.subscribers {
            callback(items);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

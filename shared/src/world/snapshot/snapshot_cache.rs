use serde_json::Value;

use crate::world::schema::descriptor::ComponentKey;

use super::component_snapshot::Snapshot;

/// The last value sent for each tracked component of one entity
#[derive(Clone, Debug, Default)]
pub struct SnapshotCache {
    cached: Snapshot,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ComponentKey) -> Option<&Value> {
        self.cached.get(key)
    }

    pub fn contains_key(&self, key: &ComponentKey) -> bool {
        self.cached.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.cached.is_empty()
    }

    /// Records values that were just put in an outgoing packet
    pub fn update(&mut self, sent: &Snapshot) {
        self.cached.merge(sent);
    }

    /// Replaces every cached value, used after a full sync
    pub fn reset(&mut self, sent: Snapshot) {
        self.cached = sent;
    }

    pub fn clear(&mut self) {
        self.cached = Snapshot::new();
    }
}

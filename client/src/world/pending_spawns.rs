use std::{
    collections::{HashMap, VecDeque},
    time::{Duration, Instant},
};

use log::info;

use netshare_shared::{EntityData, NetworkId};

/// Latest known state of entities this peer asked the host to spawn.
/// Requests the host never answers expire, so the next update for the same
/// entity asks again.
pub struct PendingSpawns {
    pending: HashMap<NetworkId, (Instant, EntityData)>,
    ttls: VecDeque<(Instant, NetworkId)>,
    ttl: Duration,
}

impl Default for PendingSpawns {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingSpawns {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(60))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            pending: HashMap::new(),
            ttls: VecDeque::new(),
            ttl,
        }
    }

    /// Records a new spawn request. Returns false, leaving the pending
    /// state untouched, if one is already outstanding for this entity.
    pub fn request(&mut self, now: &Instant, data: EntityData) -> bool {
        if self.pending.contains_key(&data.network_id) {
            return false;
        }
        let network_id = data.network_id.clone();
        self.ttls.push_back((*now, network_id.clone()));
        self.pending.insert(network_id, (*now, data));
        true
    }

    /// Folds a later update into an outstanding request. Returns false if
    /// there is none.
    pub fn merge_update(&mut self, data: &EntityData) -> bool {
        let Some((_, pending)) = self.pending.get_mut(&data.network_id) else {
            return false;
        };
        pending.owner = data.owner.clone();
        pending.components.merge(&data.components);
        if data.physics.is_some() {
            pending.physics = data.physics.clone();
        }
        true
    }

    pub fn contains(&self, network_id: &NetworkId) -> bool {
        self.pending.contains_key(network_id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Hands over the state a spawned entity starts from
    pub fn take(&mut self, network_id: &NetworkId) -> Option<EntityData> {
        self.pending.remove(network_id).map(|(_, data)| data)
    }

    pub fn remove(&mut self, network_id: &NetworkId) {
        self.pending.remove(network_id);
    }

    /// Forgets requests the host left unanswered for longer than the ttl
    pub fn expire(&mut self, now: &Instant) {
        while let Some((requested_at, _)) = self.ttls.front() {
            if now.saturating_duration_since(*requested_at) < self.ttl {
                break;
            }
            let Some((requested_at, network_id)) = self.ttls.pop_front() else {
                break;
            };
            let is_current = matches!(
                self.pending.get(&network_id),
                Some((pending_at, _)) if *pending_at == requested_at
            );
            if is_current {
                self.pending.remove(&network_id);
                info!(
                    "PendingSpawns: spawn of {} never answered, dropping its state",
                    network_id
                );
            }
        }
    }
}

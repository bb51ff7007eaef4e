use std::{
    collections::{HashMap, VecDeque},
    time::{Duration, Instant},
};

use log::info;

use netshare_shared::{EntityData, NetworkId};

/// Holds the first update of remotely spawned entities until the host
/// reports that their child elements exist. Only the child-scoped
/// components are written then; root state and ownership were already
/// handled at spawn time.
pub struct ReadinessWaitlist {
    waiting: HashMap<NetworkId, (Instant, EntityData)>,
    ttls: VecDeque<(Instant, NetworkId)>,
    ttl: Duration,
}

impl Default for ReadinessWaitlist {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessWaitlist {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(60))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            waiting: HashMap::new(),
            ttls: VecDeque::new(),
            ttl,
        }
    }

    /// Replaces any update already waiting for the same entity
    pub fn queue(&mut self, now: &Instant, data: EntityData) {
        let network_id = data.network_id.clone();
        let queued_at = match self.waiting.get(&network_id) {
            Some((queued_at, _)) => *queued_at,
            None => {
                self.ttls.push_back((*now, network_id.clone()));
                *now
            }
        };
        self.waiting.insert(network_id, (queued_at, data));
    }

    /// Folds the components of a later update into the held one, so the
    /// child values written once the children are ready are never stale
    pub fn merge_update(&mut self, data: &EntityData) {
        if let Some((_, held)) = self.waiting.get_mut(&data.network_id) {
            held.components.merge(&data.components);
        }
    }

    pub fn is_waiting(&self, network_id: &NetworkId) -> bool {
        self.waiting.contains_key(network_id)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    /// Takes the held update of an entity whose children are now ready
    pub fn mark_ready(&mut self, network_id: &NetworkId) -> Option<EntityData> {
        self.waiting.remove(network_id).map(|(_, data)| data)
    }

    pub fn remove(&mut self, network_id: &NetworkId) {
        self.waiting.remove(network_id);
    }

    /// Drops updates whose children never became ready
    pub fn expire(&mut self, now: &Instant) {
        while let Some((queued_at, _)) = self.ttls.front() {
            if now.saturating_duration_since(*queued_at) < self.ttl {
                break;
            }
            let Some((queued_at, network_id)) = self.ttls.pop_front() else {
                break;
            };
            // a stamp left over from an earlier hold of the same id
            let is_current = matches!(
                self.waiting.get(&network_id),
                Some((held_at, _)) if *held_at == queued_at
            );
            if is_current {
                self.waiting.remove(&network_id);
                info!(
                    "ReadinessWaitlist: children of {} never became ready, dropping held update",
                    network_id
                );
            }
        }
    }
}

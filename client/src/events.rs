use std::vec::IntoIter;

use netshare_shared::{NetworkId, OwnerId};

/// Something the host should react to, produced while ticking or receiving
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent<E> {
    /// This peer took ownership of a shared entity
    OwnershipTaken { network_id: NetworkId, entity: E },
    /// This peer gave up ownership of a shared entity
    OwnershipRemoved { network_id: NetworkId, entity: E },
    /// Another peer forced a takeover of an entity this peer owned
    OwnershipLost {
        network_id: NetworkId,
        entity: E,
        new_owner: OwnerId,
    },
    /// The owner of an entity this peer does not own changed
    OwnershipChanged {
        network_id: NetworkId,
        entity: E,
        new_owner: OwnerId,
    },
    /// An update arrived for an unknown entity. The host should instantiate
    /// `template` and hand the new entity to `SyncEngine::register_remote`.
    SpawnRequested {
        network_id: NetworkId,
        template: String,
        owner: OwnerId,
        parent: Option<NetworkId>,
        show_template: bool,
    },
    /// The owning peer removed the entity; the host should despawn it
    DespawnRequested { network_id: NetworkId, entity: E },
}

impl<E> EngineEvent<E> {
    pub fn network_id(&self) -> &NetworkId {
        match self {
            Self::OwnershipTaken { network_id, .. }
            | Self::OwnershipRemoved { network_id, .. }
            | Self::OwnershipLost { network_id, .. }
            | Self::OwnershipChanged { network_id, .. }
            | Self::SpawnRequested { network_id, .. }
            | Self::DespawnRequested { network_id, .. } => network_id,
        }
    }
}

pub struct EngineEvents<E> {
    events: Vec<EngineEvent<E>>,
}

impl<E> Default for EngineEvents<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EngineEvents<E> {
    pub(crate) fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EngineEvent<E>> {
        self.events.iter()
    }

    pub(crate) fn push(&mut self, event: EngineEvent<E>) {
        self.events.push(event);
    }

    /// Hands every queued event to the caller, oldest first
    pub fn drain(&mut self) -> IntoIter<EngineEvent<E>> {
        std::mem::take(&mut self.events).into_iter()
    }
}

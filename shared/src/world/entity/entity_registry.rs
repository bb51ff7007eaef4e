use std::{collections::HashMap, hash::Hash};

use log::info;

use crate::NetworkId;

use super::error::EntityNotRegisteredError;

/// Two-way binding between network ids and the host's entity handles
pub struct EntityRegistry<E: Copy + Eq + Hash> {
    network_to_entity: HashMap<NetworkId, E>,
    entity_to_network: HashMap<E, NetworkId>,
}

impl<E: Copy + Eq + Hash> Default for EntityRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Copy + Eq + Hash> EntityRegistry<E> {
    pub fn new() -> Self {
        Self {
            network_to_entity: HashMap::new(),
            entity_to_network: HashMap::new(),
        }
    }

    /// Binds `network_id` to `entity`. A later registration of the same id
    /// replaces the earlier binding.
    pub fn register(&mut self, network_id: &NetworkId, entity: E) {
        if let Some(old_entity) = self.network_to_entity.insert(network_id.clone(), entity) {
            if old_entity != entity {
                info!(
                    "EntityRegistry: network id {} rebound to a new entity",
                    network_id
                );
                self.entity_to_network.remove(&old_entity);
            }
        }
        if let Some(old_network_id) = self.entity_to_network.insert(entity, network_id.clone()) {
            if old_network_id != *network_id {
                self.network_to_entity.remove(&old_network_id);
            }
        }
    }

    pub fn lookup(&self, network_id: &NetworkId) -> Option<E> {
        self.network_to_entity.get(network_id).copied()
    }

    pub fn try_lookup(&self, network_id: &NetworkId) -> Result<E, EntityNotRegisteredError> {
        self.lookup(network_id).ok_or_else(|| EntityNotRegisteredError {
            network_id: network_id.to_string(),
        })
    }

    pub fn network_id_of(&self, entity: &E) -> Option<&NetworkId> {
        self.entity_to_network.get(entity)
    }

    pub fn contains(&self, network_id: &NetworkId) -> bool {
        self.network_to_entity.contains_key(network_id)
    }

    /// Removes the binding for `network_id`, doing nothing if there is none
    pub fn unregister(&mut self, network_id: &NetworkId) -> Option<E> {
        let entity = self.network_to_entity.remove(network_id)?;
        self.entity_to_network.remove(&entity);
        Some(entity)
    }

    pub fn len(&self) -> usize {
        self.network_to_entity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.network_to_entity.is_empty()
    }
}

use log::info;
use serde_json::{Map, Value};

use crate::world::{
    schema::{
        component_schema::ComponentSchema,
        descriptor::{ComponentDescriptor, ComponentKey},
    },
    world_type::WorldRefType,
};

/// Tracked component values of one entity, keyed by component key, in
/// schema order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    values: Map<String, Value>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn insert(&mut self, key: &ComponentKey, value: Value) {
        self.values.insert(key.as_str().to_string(), value);
    }

    pub fn get(&self, key: &ComponentKey) -> Option<&Value> {
        self.values.get(key.as_str())
    }

    pub fn contains_key(&self, key: &ComponentKey) -> bool {
        self.values.contains_key(key.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentKey, &Value)> {
        self.values
            .iter()
            .map(|(key, value)| (ComponentKey::new(key.as_str()), value))
    }

    /// Values for just the given descriptors, skipping those not captured
    pub fn select(&self, descriptors: &[ComponentDescriptor]) -> Snapshot {
        let mut selected = Snapshot::new();
        for descriptor in descriptors {
            let key = descriptor.key();
            if let Some(value) = self.get(&key) {
                selected.insert(&key, value.clone());
            }
        }
        selected
    }

    /// Overwrites this snapshot's values with every value in `other`
    pub fn merge(&mut self, other: &Snapshot) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }
}

/// Reads the current value of every schema component the entity exposes.
/// Components that are missing, or sit on children that don't exist, are
/// left out of the snapshot.
pub fn capture<E, W: WorldRefType<E> + ?Sized>(
    schema: &ComponentSchema,
    world: &W,
    entity: &E,
) -> Snapshot {
    let mut snapshot = Snapshot::new();
    for descriptor in schema {
        if let Some(value) = read_descriptor(world, entity, descriptor) {
            snapshot.insert(&descriptor.key(), value);
        }
    }
    snapshot
}

pub(crate) fn read_descriptor<E, W: WorldRefType<E> + ?Sized>(
    world: &W,
    entity: &E,
    descriptor: &ComponentDescriptor,
) -> Option<Value> {
    match descriptor {
        ComponentDescriptor::Root(name) => world
            .component(entity, name)
            .map(|component| component.get_data()),
        ComponentDescriptor::Child(child_schema) => {
            let child = world.select(entity, &child_schema.selector)?;
            let Some(component) = world.component(&child, &child_schema.component) else {
                info!(
                    "Could not find component {} on child {}",
                    child_schema.component, child_schema.selector
                );
                return None;
            };
            match &child_schema.property {
                Some(property) => component.get_property(property),
                None => Some(component.get_data()),
            }
        }
    }
}

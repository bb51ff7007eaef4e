use std::slice::Iter;

use super::descriptor::{ChildSchema, ComponentDescriptor, ComponentKey};

/// Ordered list of tracked components. The order is part of the wire
/// contract: compressed packets address components by position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ComponentSchema {
    descriptors: Vec<ComponentDescriptor>,
}

impl ComponentSchema {
    pub fn new(descriptors: Vec<ComponentDescriptor>) -> Self {
        Self { descriptors }
    }

    /// The schema used when neither the entity nor its template declares one
    pub fn transform() -> Self {
        Self::new(vec![
            ComponentDescriptor::root("position"),
            ComponentDescriptor::root("rotation"),
        ])
    }

    pub fn with_root(mut self, name: impl Into<String>) -> Self {
        self.descriptors.push(ComponentDescriptor::root(name));
        self
    }

    pub fn with_child(mut self, child: ChildSchema) -> Self {
        self.descriptors.push(ComponentDescriptor::Child(child));
        self
    }

    pub fn descriptors(&self) -> &[ComponentDescriptor] {
        &self.descriptors
    }

    pub fn iter(&self) -> Iter<'_, ComponentDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&ComponentDescriptor> {
        self.descriptors.get(position)
    }

    pub fn position_of(&self, key: &ComponentKey) -> Option<usize> {
        self.descriptors
            .iter()
            .position(|descriptor| descriptor.key() == *key)
    }

    /// Whether a received key names one of this schema's components
    pub fn contains_key(&self, key: &ComponentKey) -> bool {
        self.position_of(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = ComponentKey> + '_ {
        self.descriptors.iter().map(ComponentDescriptor::key)
    }
}

impl FromIterator<ComponentDescriptor> for ComponentSchema {
    fn from_iter<T: IntoIterator<Item = ComponentDescriptor>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ComponentSchema {
    type Item = &'a ComponentDescriptor;
    type IntoIter = Iter<'a, ComponentDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

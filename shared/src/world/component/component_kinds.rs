use std::collections::HashMap;

use serde_json::Value;

use super::{error::ComponentError, syncable::SyncableComponent};

type ComponentBuilder = fn() -> Box<dyn SyncableComponent>;

fn build_component<C: SyncableComponent + Default + 'static>() -> Box<dyn SyncableComponent> {
    Box::new(C::default())
}

/// Maps component names, as they appear in schemas and on the wire, to the
/// concrete type that implements them
pub struct ComponentKinds {
    builders: HashMap<String, ComponentBuilder>,
}

impl Default for ComponentKinds {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentKinds {
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    pub fn add_component<C: SyncableComponent + Default + 'static>(&mut self, name: &str) {
        self.builders
            .insert(name.to_string(), build_component::<C>);
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.builders.keys().map(String::as_str)
    }

    /// Builds a default instance of the named component
    pub fn try_build(&self, name: &str) -> Result<Box<dyn SyncableComponent>, ComponentError> {
        let builder =
            self.builders
                .get(name)
                .ok_or_else(|| ComponentError::ComponentNotRegistered {
                    component_name: name.to_string(),
                })?;
        Ok(builder())
    }

    /// Builds the named component and immediately applies `data` to it
    pub fn try_build_with(
        &self,
        name: &str,
        data: Value,
    ) -> Result<Box<dyn SyncableComponent>, ComponentError> {
        let mut component = self.try_build(name)?;
        component.set_data(data)?;
        Ok(component)
    }
}

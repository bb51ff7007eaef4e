use crate::world::{
    component::{
        component_kinds::ComponentKinds,
        syncable::SyncableComponent,
        transform::{Position, Rotation, Scale, Visible},
    },
    schema::{component_schema::ComponentSchema, schema_registry::SchemaRegistry},
};

pub mod error;
pub mod sync_config;

pub use error::ProtocolError;
pub use sync_config::SyncConfig;

// Protocol Plugin
pub trait ProtocolPlugin {
    fn build(&self, protocol: &mut Protocol);
}

// Protocol
pub struct Protocol {
    pub component_kinds: ComponentKinds,
    pub schemas: SchemaRegistry,
    /// Process-wide sync settings
    pub config: SyncConfig,
    locked: bool,
}

impl Default for Protocol {
    fn default() -> Self {
        let mut component_kinds = ComponentKinds::new();
        component_kinds.add_component::<Position>(Position::NAME);
        component_kinds.add_component::<Rotation>(Rotation::NAME);
        component_kinds.add_component::<Scale>(Scale::NAME);
        component_kinds.add_component::<Visible>(Visible::NAME);

        Self {
            component_kinds,
            schemas: SchemaRegistry::new(),
            config: SyncConfig::default(),
            locked: false,
        }
    }
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn add_plugin<P: ProtocolPlugin>(&mut self, plugin: P) -> &mut Self {
        self.check_lock();
        plugin.build(self);
        self
    }

    pub fn add_component<C: SyncableComponent + Default + 'static>(
        &mut self,
        name: &str,
    ) -> &mut Self {
        self.check_lock();
        self.component_kinds.add_component::<C>(name);
        self
    }

    pub fn add_schema(&mut self, template: &str, schema: ComponentSchema) -> &mut Self {
        self.check_lock();
        self.schemas.add_schema(template, schema);
        self
    }

    pub fn default_schema(&mut self, schema: ComponentSchema) -> &mut Self {
        self.check_lock();
        self.schemas.set_default_schema(schema);
        self
    }

    /// # Panics
    ///
    /// Panics if the protocol is locked or the rate is not a positive number.
    /// Consider using `try_update_rate` for non-panicking error handling.
    pub fn update_rate(&mut self, update_rate: f32) -> &mut Self {
        self.try_update_rate(update_rate)
            .expect("Update rate must be positive and Protocol must be unlocked");
        self
    }

    pub fn use_interpolation(&mut self, enabled: bool) -> &mut Self {
        self.check_lock();
        self.config.use_interpolation = enabled;
        self
    }

    pub fn compress_sync_packets(&mut self, enabled: bool) -> &mut Self {
        self.check_lock();
        self.config.compress_sync_packets = enabled;
        self
    }

    /// # Panics
    ///
    /// Panics if the protocol is locked or the config's rate is unusable.
    /// Consider using `try_sync_config` for non-panicking error handling.
    pub fn sync_config(&mut self, config: SyncConfig) -> &mut Self {
        self.try_sync_config(config)
            .expect("Update rate must be positive and Protocol must be unlocked");
        self
    }

    // Non-panicking builder methods

    pub fn try_add_plugin<P: ProtocolPlugin>(
        &mut self,
        plugin: P,
    ) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        plugin.build(self);
        Ok(self)
    }

    pub fn try_add_component<C: SyncableComponent + Default + 'static>(
        &mut self,
        name: &str,
    ) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.component_kinds.add_component::<C>(name);
        Ok(self)
    }

    pub fn try_add_schema(
        &mut self,
        template: &str,
        schema: ComponentSchema,
    ) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.schemas.add_schema(template, schema);
        Ok(self)
    }

    pub fn try_update_rate(&mut self, update_rate: f32) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        SyncConfig::interval_for(update_rate)?;
        self.config.update_rate = update_rate;
        Ok(self)
    }

    pub fn try_sync_config(&mut self, config: SyncConfig) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        config.try_sync_interval()?;
        self.config = config;
        Ok(self)
    }

    pub fn try_lock(&mut self) -> Result<(), ProtocolError> {
        self.try_check_lock()?;
        self.locked = true;
        Ok(())
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Checks if protocol is locked without panicking
    /// Returns Err if protocol is locked
    pub fn try_check_lock(&self) -> Result<(), ProtocolError> {
        if self.locked {
            Err(ProtocolError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    /// Checks if protocol is locked, panics if it is
    pub fn check_lock(&self) {
        if self.locked {
            panic!("Protocol already locked!");
        }
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }
}

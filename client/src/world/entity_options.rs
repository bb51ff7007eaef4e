use netshare_shared::{ComponentSchema, NetworkId, OwnerId};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Created by this peer and always owned by it
    Networked,
    /// Ownership can move between peers
    Shared,
    /// Read-only replica of another peer's networked entity
    Remote,
}

impl EntityKind {
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared)
    }
}

/// Per-entity settings, given by the host when an entity is registered
#[derive(Clone, Debug)]
pub struct EntityOptions {
    pub kind: EntityKind,
    pub template: String,
    /// Generated when absent
    pub network_id: Option<NetworkId>,
    /// Explicit owner. `None` resolves to this peer's client id once known.
    pub owner: Option<OwnerId>,
    /// Overrides the schema registered for `template`
    pub components: Option<ComponentSchema>,
    pub physics: bool,
    pub show_local_template: bool,
    pub show_remote_template: bool,
    pub take_ownership_signals: Vec<String>,
    pub remove_ownership_signals: Vec<String>,
}

impl EntityOptions {
    fn new(kind: EntityKind, template: &str) -> Self {
        Self {
            kind,
            template: template.to_string(),
            network_id: None,
            owner: None,
            components: None,
            physics: false,
            show_local_template: true,
            show_remote_template: true,
            take_ownership_signals: Vec::new(),
            remove_ownership_signals: Vec::new(),
        }
    }

    pub fn networked(template: &str) -> Self {
        Self::new(EntityKind::Networked, template)
    }

    /// Starts unowned and listens for `grabbed` / `touched`
    pub fn shared(template: &str) -> Self {
        let mut options = Self::new(EntityKind::Shared, template);
        options.owner = Some(OwnerId::new());
        options.take_ownership_signals = vec!["grabbed".to_string(), "touched".to_string()];
        options
    }

    pub fn remote(template: &str) -> Self {
        Self::new(EntityKind::Remote, template)
    }

    pub fn with_network_id(mut self, network_id: impl Into<NetworkId>) -> Self {
        self.network_id = Some(network_id.into());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<OwnerId>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_components(mut self, components: ComponentSchema) -> Self {
        self.components = Some(components);
        self
    }

    pub fn with_physics(mut self, physics: bool) -> Self {
        self.physics = physics;
        self
    }

    pub fn with_show_local_template(mut self, show: bool) -> Self {
        self.show_local_template = show;
        self
    }

    pub fn with_show_remote_template(mut self, show: bool) -> Self {
        self.show_remote_template = show;
        self
    }

    pub fn with_take_ownership_signals<I, S>(mut self, signals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.take_ownership_signals = signals.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_remove_ownership_signals<I, S>(mut self, signals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove_ownership_signals = signals.into_iter().map(Into::into).collect();
        self
    }
}

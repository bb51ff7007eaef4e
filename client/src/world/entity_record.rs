use std::{hash::Hash, time::Instant};

use log::{debug, info, warn};
use serde_json::Value;

use netshare_shared::{
    capture, diff, ComponentKinds, ComponentSchema, CompressedEntityData, DataType, EntityData,
    EntityRegistry, NetworkId, OwnershipArbiter, OwnershipError, OwnershipState,
    OwnershipTransition, PacketCodec, PhysicsBridge, PhysicsState, Snapshot, SnapshotCache,
    SyncPacket, SyncScheduler, WorldMutType, WorldRefType,
};

use crate::{
    events::{EngineEvent, EngineEvents},
    session::SessionContext,
    transport::Transport,
};

use super::{
    entity_options::{EntityKind, EntityOptions},
    subscriptions::{Subscription, Subscriptions},
};

/// Which keys of a received snapshot get written to the world
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ComponentScope {
    All,
    Root,
    Children,
}

/// Sync state of one networked entity on this peer
pub struct EntityRecord<E: Copy + Eq + Hash> {
    entity: E,
    network_id: NetworkId,
    options: EntityOptions,
    schema: ComponentSchema,
    arbiter: OwnershipArbiter,
    owner_resolved: bool,
    locally_created: bool,
    cache: SnapshotCache,
    scheduler: SyncScheduler,
    physics_state: PhysicsState,
    subscriptions: Subscriptions,
}

impl<E: Copy + Eq + Hash> EntityRecord<E> {
    /// Record for an entity created on this peer. Its owner stays unresolved
    /// until the session knows this peer's client id. Shared entities listen
    /// to other peers from the start.
    pub(crate) fn local<T: Transport, P>(
        entity: E,
        network_id: NetworkId,
        options: EntityOptions,
        session: &SessionContext<T, P>,
    ) -> Self {
        let schema = Self::effective_schema(&options, session);
        let mut record = Self {
            entity,
            network_id,
            options,
            schema,
            arbiter: OwnershipArbiter::default(),
            owner_resolved: false,
            locally_created: true,
            cache: SnapshotCache::new(),
            scheduler: SyncScheduler::from_config(session.config()),
            physics_state: PhysicsState::new(),
            subscriptions: Subscriptions::new(),
        };
        if record.options.kind == EntityKind::Shared {
            record.settle_subscriptions(false);
        }
        record
    }

    /// Record for an entity another peer announced
    pub(crate) fn remote<T: Transport, P>(
        entity: E,
        network_id: NetworkId,
        options: EntityOptions,
        owner: &str,
        session: &SessionContext<T, P>,
    ) -> Self {
        let schema = Self::effective_schema(&options, session);
        let mut record = Self {
            entity,
            network_id,
            options,
            schema,
            arbiter: OwnershipArbiter::new(owner),
            owner_resolved: true,
            locally_created: false,
            cache: SnapshotCache::new(),
            scheduler: SyncScheduler::from_config(session.config()),
            physics_state: PhysicsState::new(),
            subscriptions: Subscriptions::new(),
        };
        let is_mine = record.arbiter.is_mine(session.transport());
        record.settle_subscriptions(is_mine);
        record
    }

    fn effective_schema<T: Transport, P>(
        options: &EntityOptions,
        session: &SessionContext<T, P>,
    ) -> ComponentSchema {
        match &options.components {
            Some(schema) => schema.clone(),
            None => session.protocol().schemas.schema(&options.template).clone(),
        }
    }

    fn settle_subscriptions(&mut self, is_mine: bool) {
        match self.options.kind {
            EntityKind::Networked => {
                self.subscriptions.subscribe(Subscription::OwnerSync);
            }
            EntityKind::Shared => {
                self.subscriptions.subscribe(Subscription::OwnershipSignals);
                if is_mine {
                    self.subscriptions.unsubscribe(Subscription::RemoteUpdates);
                    self.subscriptions.subscribe(Subscription::OwnerSync);
                } else {
                    self.subscriptions.unsubscribe(Subscription::OwnerSync);
                    self.subscriptions.subscribe(Subscription::RemoteUpdates);
                }
            }
            EntityKind::Remote => {
                self.subscriptions.subscribe(Subscription::RemoteUpdates);
            }
        }
    }

    pub fn entity(&self) -> E {
        self.entity
    }

    pub fn network_id(&self) -> &NetworkId {
        &self.network_id
    }

    pub fn kind(&self) -> EntityKind {
        self.options.kind
    }

    pub fn options(&self) -> &EntityOptions {
        &self.options
    }

    pub fn schema(&self) -> &ComponentSchema {
        &self.schema
    }

    pub fn owner(&self) -> &str {
        self.arbiter.owner()
    }

    pub fn ownership_state<T: Transport, P>(&self, session: &SessionContext<T, P>) -> OwnershipState {
        self.arbiter.state(session.transport())
    }

    pub fn is_mine<T: Transport, P>(&self, session: &SessionContext<T, P>) -> bool {
        self.arbiter.is_mine(session.transport())
    }

    pub fn is_owner_resolved(&self) -> bool {
        self.owner_resolved
    }

    pub fn is_locally_created(&self) -> bool {
        self.locally_created
    }

    pub fn takeover_pending(&self) -> bool {
        self.arbiter.takeover_pending()
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    pub fn scheduler(&self) -> &SyncScheduler {
        &self.scheduler
    }

    pub fn physics_state(&self) -> &PhysicsState {
        &self.physics_state
    }

    // Owner resolution

    /// Resolves the owner of a locally created entity once the client id is
    /// known: the explicit owner option (even an empty one) wins, otherwise
    /// this peer owns it. Returns false if already resolved or still unknown.
    pub(crate) fn resolve_owner<T: Transport, P>(&mut self, session: &SessionContext<T, P>) -> bool {
        if self.owner_resolved {
            return false;
        }
        let Some(client_id) = session.client_id() else {
            return false;
        };

        let owner = self
            .options
            .owner
            .clone()
            .unwrap_or_else(|| client_id.to_string());
        self.arbiter.set_owner(owner);
        self.owner_resolved = true;

        let is_mine = self.arbiter.is_mine(session.transport());
        self.settle_subscriptions(is_mine);

        info!(
            "EntityRecord: {} ({:?}) resolved owner {:?}",
            self.network_id,
            self.options.kind,
            self.arbiter.owner()
        );
        true
    }

    /// Whether the owner's scheduling deadline has passed
    pub(crate) fn needs_to_sync<T: Transport, P>(
        &self,
        now: &Instant,
        session: &SessionContext<T, P>,
    ) -> bool {
        self.owner_resolved
            && self.options.kind != EntityKind::Remote
            && self.is_mine(session)
            && self.scheduler.needs_to_sync(now)
    }

    // Outbound

    /// Sends every tracked component on the guaranteed tier and resets the
    /// cache to what was sent. Carries the takeover flag if one is armed.
    pub(crate) fn sync_all<T, P, W>(
        &mut self,
        now: &Instant,
        session: &mut SessionContext<T, P>,
        registry: &EntityRegistry<E>,
        world: &W,
    ) where
        T: Transport,
        P: PhysicsBridge<E>,
        W: WorldRefType<E> + ?Sized,
    {
        self.scheduler.update_next_sync_time(now);

        let components = capture(&self.schema, world, &self.entity);
        let takeover = self.arbiter.consume_takeover();
        let data = self.sync_data(components.clone(), takeover, session, registry, world);

        broadcast_sync(session, &SyncPacket::Full(data), true);
        self.cache.reset(components);
    }

    /// Sends only the components that changed since the last sync, on the
    /// best-effort tier. Returns false if there was nothing to send.
    pub(crate) fn sync_dirty<T, P, W>(
        &mut self,
        now: &Instant,
        session: &mut SessionContext<T, P>,
        registry: &EntityRegistry<E>,
        world: &W,
    ) -> bool
    where
        T: Transport,
        P: PhysicsBridge<E>,
        W: WorldRefType<E> + ?Sized,
    {
        self.scheduler.update_next_sync_time(now);

        let fresh = capture(&self.schema, world, &self.entity);
        let dirty = diff(&self.schema, &fresh, &self.cache);
        if dirty.is_empty() && !self.options.physics {
            debug!("EntityRecord: {} unchanged, skipping sync", self.network_id);
            return false;
        }

        let components = fresh.select(&dirty);
        let data = self.sync_data(components.clone(), false, session, registry, world);
        let packet = if session.config().compress_sync_packets {
            SyncPacket::Compressed(CompressedEntityData::compress(&data, &self.schema))
        } else {
            SyncPacket::Full(data)
        };

        broadcast_sync(session, &packet, false);
        self.cache.update(&components);
        true
    }

    fn sync_data<T, P, W>(
        &self,
        components: Snapshot,
        takeover: bool,
        session: &SessionContext<T, P>,
        registry: &EntityRegistry<E>,
        world: &W,
    ) -> EntityData
    where
        T: Transport,
        P: PhysicsBridge<E>,
        W: WorldRefType<E> + ?Sized,
    {
        let mut data = EntityData::new(
            self.network_id.clone(),
            self.arbiter.owner(),
            self.options.template.as_str(),
        );
        data.takeover = takeover;
        data.show_template = self.options.show_remote_template;
        data.parent = world
            .parent(&self.entity)
            .and_then(|parent| registry.network_id_of(&parent).cloned());
        data.components = components;
        if self.options.physics {
            data.physics = session.physics().physics_data(&self.entity);
        }
        data
    }

    // Ownership

    pub(crate) fn take_ownership<T, P, W>(
        &mut self,
        now: &Instant,
        session: &mut SessionContext<T, P>,
        registry: &EntityRegistry<E>,
        world: &mut W,
        events: &mut EngineEvents<E>,
    ) -> Result<(), OwnershipError>
    where
        T: Transport,
        P: PhysicsBridge<E>,
        W: WorldMutType<E> + ?Sized,
    {
        let Some(client_id) = session.client_id() else {
            return Err(OwnershipError::IdentityUnknown {
                network_id: self.network_id.to_string(),
                operation: "take ownership",
            });
        };
        let client_id = client_id.to_string();

        self.arbiter
            .try_take_ownership(&self.network_id, &client_id, session.transport())?;
        self.owner_resolved = true;

        self.subscriptions.unsubscribe(Subscription::RemoteUpdates);
        self.subscriptions.unsubscribe(Subscription::OwnerSync);

        if self.options.physics {
            session.physics_mut().detach_physics_lerp(&self.entity);
            session.physics_mut().wake_up(&self.entity);
        } else if session.config().use_interpolation {
            world.set_interpolated(&self.entity, false);
        }

        events.push(EngineEvent::OwnershipTaken {
            network_id: self.network_id.clone(),
            entity: self.entity,
        });

        self.sync_all(now, session, registry, world);

        self.subscriptions.subscribe(Subscription::OwnerSync);
        Ok(())
    }

    pub(crate) fn remove_ownership<T, P, W>(
        &mut self,
        now: &Instant,
        session: &mut SessionContext<T, P>,
        registry: &EntityRegistry<E>,
        world: &mut W,
        events: &mut EngineEvents<E>,
    ) -> Result<(), OwnershipError>
    where
        T: Transport,
        P: PhysicsBridge<E>,
        W: WorldMutType<E> + ?Sized,
    {
        self.arbiter
            .try_remove_ownership(&self.network_id, session.transport())?;

        self.subscriptions.unsubscribe(Subscription::OwnerSync);
        self.subscriptions.subscribe(Subscription::RemoteUpdates);

        self.attach_interpolation(session, world);

        events.push(EngineEvent::OwnershipRemoved {
            network_id: self.network_id.clone(),
            entity: self.entity,
        });

        self.sync_all(now, session, registry, world);
        Ok(())
    }

    // The physics engine interpolates physics bodies itself
    fn attach_interpolation<T, P, W>(&self, session: &SessionContext<T, P>, world: &mut W)
    where
        T: Transport,
        W: WorldMutType<E> + ?Sized,
    {
        if !self.options.physics && session.config().use_interpolation {
            world.set_interpolated(&self.entity, true);
        }
    }

    // Inbound

    /// Handles one update from another peer: reconciles the ownership claim
    /// of shared entities, then applies physics and components if remote
    /// updates are currently subscribed.
    pub(crate) fn receive_update<T, P, W>(
        &mut self,
        data: &EntityData,
        session: &mut SessionContext<T, P>,
        world: &mut W,
        events: &mut EngineEvents<E>,
    ) where
        T: Transport,
        P: PhysicsBridge<E>,
        W: WorldMutType<E> + ?Sized,
    {
        match self.options.kind {
            EntityKind::Shared => self.receive_claim(data, session, world, events),
            EntityKind::Remote => {
                if self.arbiter.owner() != data.owner {
                    self.arbiter.set_owner(data.owner.as_str());
                }
            }
            EntityKind::Networked => {}
        }

        if !self.subscriptions.is_subscribed(Subscription::RemoteUpdates) {
            debug!(
                "EntityRecord: {} not listening to remote updates, ignoring components",
                self.network_id
            );
            return;
        }

        self.apply_physics(data, session);
        self.apply_components(
            &data.components,
            &session.protocol().component_kinds,
            world,
            ComponentScope::All,
        );
    }

    /// Applies the update a replica was spawned from. Only root components
    /// are written; child keys wait until the host reports the children.
    pub(crate) fn receive_first_update<T, P, W>(
        &mut self,
        data: &EntityData,
        session: &mut SessionContext<T, P>,
        world: &mut W,
    ) where
        T: Transport,
        P: PhysicsBridge<E>,
        W: WorldMutType<E> + ?Sized,
    {
        if !self.subscriptions.is_subscribed(Subscription::RemoteUpdates) {
            return;
        }
        self.apply_physics(data, session);
        self.apply_components(
            &data.components,
            &session.protocol().component_kinds,
            world,
            ComponentScope::Root,
        );
    }

    fn apply_physics<T, P>(&mut self, data: &EntityData, session: &mut SessionContext<T, P>)
    where
        T: Transport,
        P: PhysicsBridge<E>,
    {
        let Some(payload) = &data.physics else {
            return;
        };
        if self.is_mine(session) {
            return;
        }
        let use_interpolation = session.config().use_interpolation;
        self.physics_state
            .apply(session.physics_mut(), &self.entity, payload, use_interpolation);
    }

    fn receive_claim<T, P, W>(
        &mut self,
        data: &EntityData,
        session: &SessionContext<T, P>,
        world: &mut W,
        events: &mut EngineEvents<E>,
    ) where
        T: Transport,
        W: WorldMutType<E> + ?Sized,
    {
        let transition = self.arbiter.receive_claim(
            &self.network_id,
            session.client_id(),
            session.transport(),
            &data.owner,
            data.takeover,
        );

        match transition {
            Some(OwnershipTransition::Lost { new_owner }) => {
                self.subscriptions.unsubscribe(Subscription::OwnerSync);
                self.subscriptions.subscribe(Subscription::RemoteUpdates);
                self.attach_interpolation(session, world);

                events.push(EngineEvent::OwnershipLost {
                    network_id: self.network_id.clone(),
                    entity: self.entity,
                    new_owner,
                });
            }
            Some(OwnershipTransition::Changed { new_owner }) => {
                // another peer claimed it before this one knew its identity
                if !self.owner_resolved {
                    self.owner_resolved = true;
                    info!(
                        "EntityRecord: {} adopted owner {:?} before resolving",
                        self.network_id, new_owner
                    );
                }
                events.push(EngineEvent::OwnershipChanged {
                    network_id: self.network_id.clone(),
                    entity: self.entity,
                    new_owner,
                });
            }
            _ => {}
        }
    }

    /// Writes received component values into the host world. Keys outside
    /// this entity's schema are ignored, as are child keys whose selector
    /// matches nothing yet.
    pub(crate) fn apply_components<W: WorldMutType<E> + ?Sized>(
        &self,
        components: &Snapshot,
        component_kinds: &ComponentKinds,
        world: &mut W,
        scope: ComponentScope,
    ) {
        for (key, value) in components.iter() {
            if !self.schema.contains_key(&key) {
                debug!(
                    "EntityRecord: {} has no tracked component {}, skipping",
                    self.network_id, key
                );
                continue;
            }

            match key.to_child_schema() {
                Some(child_schema) => {
                    if scope == ComponentScope::Root {
                        continue;
                    }
                    let Some(child) = world.select(&self.entity, &child_schema.selector) else {
                        debug!(
                            "EntityRecord: {} has no child matching {:?} yet",
                            self.network_id, child_schema.selector
                        );
                        continue;
                    };
                    write_component(
                        world,
                        component_kinds,
                        &child,
                        &child_schema.component,
                        child_schema.property.as_deref(),
                        value,
                    );
                }
                None if scope == ComponentScope::Children => {}
                None => write_component(
                    world,
                    component_kinds,
                    &self.entity,
                    key.as_str(),
                    None,
                    value,
                ),
            }
        }
    }
}

fn broadcast_sync<T: Transport, P>(
    session: &mut SessionContext<T, P>,
    packet: &SyncPacket,
    guaranteed: bool,
) {
    let payload = match PacketCodec::encode_sync(packet) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(
                "EntityRecord: could not encode sync of {}: {}",
                packet.network_id(),
                err
            );
            return;
        }
    };

    let transport = session.transport_mut();
    let result = if guaranteed {
        transport.broadcast_guaranteed(DataType::EntityUpdate, &payload)
    } else {
        transport.broadcast_best_effort(DataType::EntityUpdate, &payload)
    };
    if let Err(err) = result {
        warn!("EntityRecord: sync of {} not sent: {}", packet.network_id(), err);
    }
}

fn write_component<E, W: WorldMutType<E> + ?Sized>(
    world: &mut W,
    component_kinds: &ComponentKinds,
    entity: &E,
    component_name: &str,
    property: Option<&str>,
    value: &Value,
) {
    if let Some(component) = world.component_mut(entity, component_name) {
        let result = match property {
            Some(property) => component.set_property(property, value.clone()),
            None => component.set_data(value.clone()),
        };
        if let Err(err) = result {
            warn!("EntityRecord: could not apply {}: {}", component_name, err);
        }
        return;
    }

    let mut component = match component_kinds.try_build(component_name) {
        Ok(component) => component,
        Err(err) => {
            warn!("EntityRecord: could not create {}: {}", component_name, err);
            return;
        }
    };
    let result = match property {
        Some(property) => component.set_property(property, value.clone()),
        None => component.set_data(value.clone()),
    };
    match result {
        Ok(()) => world.insert_component(entity, component_name, component),
        Err(err) => warn!("EntityRecord: could not apply {}: {}", component_name, err),
    }
}

use std::{collections::HashMap, hash::Hash, time::Instant, vec::IntoIter};

use log::{debug, info, warn};

use netshare_shared::{
    DataType, EntityNotRegisteredError, EntityRegistry, InboundPacket, NetworkId,
    OwnerId, OwnershipError, OwnershipState, PacketCodec, PacketError, PhysicsBridge, Protocol,
    RemoveData, SyncKind, SyncPacket, WorldMutType, WorldRefType,
};

use crate::{
    error::SyncEngineError,
    events::{EngineEvent, EngineEvents},
    session::SessionContext,
    transport::Transport,
    world::{
        entity_options::{EntityKind, EntityOptions},
        entity_record::{ComponentScope, EntityRecord},
        pending_spawns::PendingSpawns,
        readiness_waitlist::ReadinessWaitlist,
        subscriptions::Subscription,
    },
};

/// Keeps this peer's networked entities in sync with every other peer.
///
/// The host drives it from its frame loop: call [`SyncEngine::tick`] once per
/// frame, hand every payload received from the transport to
/// [`SyncEngine::receive`], and forward entity lifecycle changes through the
/// `register_*` / `unregister_entity` methods. Anything the host must act
/// on is queued as an [`EngineEvent`].
pub struct SyncEngine<E: Copy + Eq + Hash, T: Transport, P: PhysicsBridge<E>> {
    session: SessionContext<T, P>,
    registry: EntityRegistry<E>,
    records: HashMap<NetworkId, EntityRecord<E>>,
    pending_spawns: PendingSpawns,
    waitlist: ReadinessWaitlist,
    events: EngineEvents<E>,
}

impl<E: Copy + Eq + Hash, T: Transport, P: PhysicsBridge<E>> SyncEngine<E, T, P> {
    /// Locks `protocol` if the caller has not
    pub fn new(protocol: Protocol, transport: T, physics: P) -> Self {
        Self {
            session: SessionContext::new(protocol, transport, physics),
            registry: EntityRegistry::new(),
            records: HashMap::new(),
            pending_spawns: PendingSpawns::new(),
            waitlist: ReadinessWaitlist::new(),
            events: EngineEvents::new(),
        }
    }

    // Session

    pub fn session(&self) -> &SessionContext<T, P> {
        &self.session
    }

    pub fn client_id(&self) -> Option<&str> {
        self.session.client_id()
    }

    pub fn transport(&self) -> &T {
        self.session.transport()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.session.transport_mut()
    }

    pub fn physics(&self) -> &P {
        self.session.physics()
    }

    pub fn physics_mut(&mut self) -> &mut P {
        self.session.physics_mut()
    }

    /// Called once the transport knows this peer's identity. Every entity
    /// created locally before then resolves its owner and sends a full sync.
    pub fn set_client_id<W: WorldRefType<E> + ?Sized>(
        &mut self,
        client_id: impl Into<OwnerId>,
        now: &Instant,
        world: &W,
    ) {
        self.session.set_client_id(client_id);

        for record in self.records.values_mut() {
            if record.is_locally_created() && record.resolve_owner(&self.session) {
                record.sync_all(now, &mut self.session, &self.registry, world);
            }
        }
    }

    // Registration

    /// Registers an entity created on this peer and returns its network id.
    /// If the client id is already known the owner resolves immediately and
    /// a full sync goes out.
    pub fn register_entity<W: WorldRefType<E> + ?Sized>(
        &mut self,
        entity: E,
        options: EntityOptions,
        now: &Instant,
        world: &W,
    ) -> NetworkId {
        let network_id = options
            .network_id
            .clone()
            .unwrap_or_else(NetworkId::generate);
        self.registry.register(&network_id, entity);

        let mut record = if options.kind == EntityKind::Remote {
            let owner = options.owner.clone().unwrap_or_default();
            EntityRecord::remote(entity, network_id.clone(), options, &owner, &self.session)
        } else {
            EntityRecord::local(entity, network_id.clone(), options, &self.session)
        };
        info!(
            "SyncEngine: registered {:?} entity {}",
            record.kind(),
            network_id
        );

        if record.resolve_owner(&self.session) {
            record.sync_all(now, &mut self.session, &self.registry, world);
        }

        self.records.insert(network_id.clone(), record);
        network_id
    }

    /// Registers the entity the host spawned in answer to
    /// [`EngineEvent::SpawnRequested`]. The latest state received for it is
    /// applied to the root right away; its child components are held until
    /// [`SyncEngine::notify_children_ready`].
    pub fn register_remote<W: WorldMutType<E> + ?Sized>(
        &mut self,
        entity: E,
        network_id: &NetworkId,
        options: EntityOptions,
        now: &Instant,
        world: &mut W,
    ) {
        let first_update = self.pending_spawns.take(network_id);
        let owner = first_update
            .as_ref()
            .map(|data| data.owner.clone())
            .or_else(|| options.owner.clone())
            .unwrap_or_default();

        self.registry.register(network_id, entity);
        let mut record =
            EntityRecord::remote(entity, network_id.clone(), options, &owner, &self.session);

        if record.kind() == EntityKind::Remote
            && !record.options().physics
            && self.session.config().use_interpolation
        {
            world.set_interpolated(&entity, true);
        }

        if let Some(data) = first_update {
            record.receive_first_update(&data, &mut self.session, world);
            self.waitlist.queue(now, data);
        }

        info!(
            "SyncEngine: registered remote {:?} entity {} owned by {:?}",
            record.kind(),
            network_id,
            owner
        );
        self.records.insert(network_id.clone(), record);
    }

    /// Writes the held child components now that the entity's children
    /// exist. Ownership and root state are left as they are.
    pub fn notify_children_ready<W: WorldMutType<E> + ?Sized>(
        &mut self,
        network_id: &NetworkId,
        world: &mut W,
    ) -> bool {
        let Some(data) = self.waitlist.mark_ready(network_id) else {
            return false;
        };
        let Some(record) = self.records.get(network_id) else {
            return false;
        };

        record.apply_components(
            &data.components,
            &self.session.protocol().component_kinds,
            world,
            ComponentScope::Children,
        );
        true
    }

    /// Tears down the record of an entity removed on this peer. Shared
    /// entities give up ownership first; networked and shared entities tell
    /// other peers about the removal.
    pub fn unregister_entity<W: WorldMutType<E> + ?Sized>(
        &mut self,
        network_id: &NetworkId,
        now: &Instant,
        world: &mut W,
    ) -> Option<E> {
        let mut record = self.records.remove(network_id)?;

        match record.kind() {
            EntityKind::Shared => {
                if record.is_mine(&self.session) {
                    if let Err(err) = record.remove_ownership(
                        now,
                        &mut self.session,
                        &self.registry,
                        world,
                        &mut self.events,
                    ) {
                        debug!("SyncEngine: {}", err);
                    }
                }
                self.broadcast_remove(network_id);
            }
            EntityKind::Networked => self.broadcast_remove(network_id),
            EntityKind::Remote => {}
        }

        self.waitlist.remove(network_id);
        info!("SyncEngine: unregistered entity {}", network_id);
        self.registry.unregister(network_id)
    }

    fn broadcast_remove(&mut self, network_id: &NetworkId) {
        let payload = match PacketCodec::encode_remove(&RemoveData::new(network_id.clone())) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("SyncEngine: could not encode removal of {}: {}", network_id, err);
                return;
            }
        };
        if let Err(err) = self
            .session
            .transport_mut()
            .broadcast_best_effort(DataType::EntityRemoved, &payload)
        {
            warn!("SyncEngine: removal of {} not sent: {}", network_id, err);
        }
    }

    // Outbound

    /// Sends a dirty sync for every owned entity whose deadline passed
    pub fn tick<W: WorldRefType<E> + ?Sized>(&mut self, now: &Instant, world: &W) {
        self.waitlist.expire(now);
        self.pending_spawns.expire(now);

        for record in self.records.values_mut() {
            if record.needs_to_sync(now, &self.session) {
                record.sync_dirty(now, &mut self.session, &self.registry, world);
            }
        }
    }

    /// Host-requested sync, honored only while the entity listens for owner
    /// sync requests. Returns whether a sync was attempted.
    pub fn trigger_sync<W: WorldRefType<E> + ?Sized>(
        &mut self,
        network_id: &NetworkId,
        sync_kind: SyncKind,
        now: &Instant,
        world: &W,
    ) -> bool {
        let Some(record) = self.records.get_mut(network_id) else {
            return false;
        };
        if !record.subscriptions().is_subscribed(Subscription::OwnerSync) {
            debug!(
                "SyncEngine: {} does not accept sync requests right now",
                network_id
            );
            return false;
        }

        match sync_kind {
            SyncKind::All => record.sync_all(now, &mut self.session, &self.registry, world),
            SyncKind::Dirty => {
                record.sync_dirty(now, &mut self.session, &self.registry, world);
            }
        }
        true
    }

    // Ownership

    pub fn take_ownership<W: WorldMutType<E> + ?Sized>(
        &mut self,
        network_id: &NetworkId,
        now: &Instant,
        world: &mut W,
    ) -> Result<(), SyncEngineError> {
        let record = Self::shared_record(&mut self.records, network_id)?;
        record.take_ownership(
            now,
            &mut self.session,
            &self.registry,
            world,
            &mut self.events,
        )?;
        Ok(())
    }

    pub fn remove_ownership<W: WorldMutType<E> + ?Sized>(
        &mut self,
        network_id: &NetworkId,
        now: &Instant,
        world: &mut W,
    ) -> Result<(), SyncEngineError> {
        let record = Self::shared_record(&mut self.records, network_id)?;
        record.remove_ownership(
            now,
            &mut self.session,
            &self.registry,
            world,
            &mut self.events,
        )?;
        Ok(())
    }

    fn shared_record<'a>(
        records: &'a mut HashMap<NetworkId, EntityRecord<E>>,
        network_id: &NetworkId,
    ) -> Result<&'a mut EntityRecord<E>, SyncEngineError> {
        let record = records
            .get_mut(network_id)
            .ok_or_else(|| EntityNotRegisteredError {
                network_id: network_id.to_string(),
            })?;
        if !record.kind().is_shared() {
            return Err(SyncEngineError::NotShared {
                network_id: network_id.to_string(),
            });
        }
        Ok(record)
    }

    /// Maps an interaction signal (e.g. `grabbed`) to an ownership change
    /// through the entity's signal lists. Returns whether ownership changed.
    pub fn handle_signal<W: WorldMutType<E> + ?Sized>(
        &mut self,
        network_id: &NetworkId,
        signal: &str,
        now: &Instant,
        world: &mut W,
    ) -> bool {
        let Some(record) = self.records.get(network_id) else {
            return false;
        };
        if !record
            .subscriptions()
            .is_subscribed(Subscription::OwnershipSignals)
        {
            return false;
        }

        let options = record.options();
        let takes = options.take_ownership_signals.iter().any(|s| s == signal);
        let removes = options.remove_ownership_signals.iter().any(|s| s == signal);

        let result = if takes {
            self.take_ownership(network_id, now, world)
        } else if removes {
            self.remove_ownership(network_id, now, world)
        } else {
            return false;
        };

        match result {
            Ok(()) => true,
            Err(SyncEngineError::Ownership(
                err @ (OwnershipError::AlreadyOwned { .. } | OwnershipError::NotOwned { .. }),
            )) => {
                debug!("SyncEngine: signal {:?} ignored: {}", signal, err);
                false
            }
            Err(err) => {
                warn!("SyncEngine: signal {:?} failed: {}", signal, err);
                false
            }
        }
    }

    /// Forces a takeover of the shared entity this owned physics entity hit,
    /// when the other entity is unowned or loses the priority comparison.
    /// Returns whether ownership was taken.
    pub fn handle_collision<W: WorldMutType<E> + ?Sized>(
        &mut self,
        network_id: &NetworkId,
        collision: &P::Collision,
        now: &Instant,
        world: &mut W,
    ) -> bool {
        let Some(record) = self.records.get(network_id) else {
            return false;
        };
        if !record.options().physics || !record.is_mine(&self.session) {
            return false;
        }
        let entity = record.entity();

        let Some(collision_data) = self.session.physics().collision_data(collision) else {
            debug!("SyncEngine: collision of {} carries no body, skipping", network_id);
            return false;
        };
        let Some(other_id) = self.registry.network_id_of(&collision_data.entity).cloned() else {
            return false;
        };
        let Some(other) = self.records.get(&other_id) else {
            return false;
        };
        if !other.kind().is_shared() {
            return false;
        }

        let is_stronger = self
            .session
            .physics()
            .is_stronger_than(&entity, &collision_data.body);
        if !is_stronger && !other.owner().is_empty() {
            return false;
        }

        match self.take_ownership(&other_id, now, world) {
            Ok(()) => {
                info!(
                    "SyncEngine: {} took {} over after a collision",
                    network_id, other_id
                );
                true
            }
            Err(err) => {
                debug!("SyncEngine: collision transfer skipped: {}", err);
                false
            }
        }
    }

    // Inbound

    /// Applies a payload received from the transport. Malformed payloads are
    /// logged and dropped.
    pub fn receive<W: WorldMutType<E> + ?Sized>(
        &mut self,
        data_type: DataType,
        payload: &[u8],
        now: &Instant,
        world: &mut W,
    ) {
        if let Err(err) = self.try_receive(data_type, payload, now, world) {
            warn!(
                "SyncEngine: dropping {:?} payload: {}",
                data_type.as_str(),
                err
            );
        }
    }

    pub fn try_receive<W: WorldMutType<E> + ?Sized>(
        &mut self,
        data_type: DataType,
        payload: &[u8],
        now: &Instant,
        world: &mut W,
    ) -> Result<(), PacketError> {
        match PacketCodec::decode(data_type, payload)? {
            InboundPacket::Update(packet) => self.receive_update(packet, now, world),
            InboundPacket::Remove(remove) => self.receive_remove(&remove),
        }
        Ok(())
    }

    fn receive_update<W: WorldMutType<E> + ?Sized>(
        &mut self,
        packet: SyncPacket,
        now: &Instant,
        world: &mut W,
    ) {
        let network_id = packet.network_id().clone();

        if let Some(record) = self.records.get_mut(&network_id) {
            let data = packet.into_entity_data(record.schema());
            self.waitlist.merge_update(&data);
            record.receive_update(&data, &mut self.session, world, &mut self.events);
            return;
        }

        let template = packet.template().to_string();
        let data = packet.into_entity_data(self.session.protocol().schemas.schema(&template));

        if self.pending_spawns.merge_update(&data) {
            return;
        }

        info!(
            "SyncEngine: update for unknown entity {}, requesting spawn of {:?}",
            network_id, template
        );
        self.events.push(EngineEvent::SpawnRequested {
            network_id: network_id.clone(),
            template,
            owner: data.owner.clone(),
            parent: data.parent.clone(),
            show_template: data.show_template,
        });
        self.pending_spawns.request(now, data);
    }

    fn receive_remove(&mut self, remove: &RemoveData) {
        let network_id = &remove.network_id;
        self.pending_spawns.remove(network_id);
        self.waitlist.remove(network_id);

        let Some(record) = self.records.remove(network_id) else {
            return;
        };
        self.registry.unregister(network_id);

        info!("SyncEngine: entity {} removed by its owner", network_id);
        self.events.push(EngineEvent::DespawnRequested {
            network_id: network_id.clone(),
            entity: record.entity(),
        });
    }

    // Events

    pub fn events(&self) -> &EngineEvents<E> {
        &self.events
    }

    /// Hands every queued event to the host, oldest first
    pub fn drain_events(&mut self) -> IntoIter<EngineEvent<E>> {
        self.events.drain()
    }

    // Queries

    pub fn entity(&self, network_id: &NetworkId) -> Option<E> {
        self.registry.lookup(network_id)
    }

    pub fn try_entity(&self, network_id: &NetworkId) -> Result<E, EntityNotRegisteredError> {
        self.registry.try_lookup(network_id)
    }

    pub fn network_id(&self, entity: &E) -> Option<&NetworkId> {
        self.registry.network_id_of(entity)
    }

    pub fn has_entity(&self, network_id: &NetworkId) -> bool {
        self.records.contains_key(network_id)
    }

    pub fn entity_count(&self) -> usize {
        self.records.len()
    }

    pub fn record(&self, network_id: &NetworkId) -> Option<&EntityRecord<E>> {
        self.records.get(network_id)
    }

    pub fn owner(&self, network_id: &NetworkId) -> Option<&str> {
        self.records.get(network_id).map(|record| record.owner())
    }

    pub fn ownership_state(&self, network_id: &NetworkId) -> Option<OwnershipState> {
        self.records
            .get(network_id)
            .map(|record| record.ownership_state(&self.session))
    }

    pub fn is_mine(&self, network_id: &NetworkId) -> bool {
        self.records
            .get(network_id)
            .map(|record| record.is_mine(&self.session))
            .unwrap_or(false)
    }

    pub fn is_subscribed(&self, network_id: &NetworkId, subscription: Subscription) -> bool {
        self.records
            .get(network_id)
            .map(|record| record.subscriptions().is_subscribed(subscription))
            .unwrap_or(false)
    }

    pub fn has_pending_spawn(&self, network_id: &NetworkId) -> bool {
        self.pending_spawns.contains(network_id)
    }

    pub fn is_waiting_for_children(&self, network_id: &NetworkId) -> bool {
        self.waitlist.is_waiting(network_id)
    }
}

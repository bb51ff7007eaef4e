//! # Netshare Shared
//! Common functionality for netshare peers: component schemas, snapshots and
//! dirty diffing, the sync packet wire formats, and the ownership arbiter.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod packet;
mod protocol;
mod sync_scheduler;
mod types;
mod world;

pub use packet::{
    codec::{InboundPacket, PacketCodec},
    compressed_data::CompressedEntityData,
    data_type::DataType,
    entity_data::EntityData,
    error::PacketError,
    remove_data::RemoveData,
    sync_packet::SyncPacket,
    COMPRESSED_MARKER, FULL_MARKER,
};
pub use protocol::{Protocol, ProtocolError, ProtocolPlugin, SyncConfig};
pub use sync_scheduler::{SyncKind, SyncScheduler};
pub use types::{NetworkId, OwnerId};
pub use world::{
    component::{
        component_kinds::ComponentKinds,
        error::ComponentError,
        syncable::SyncableComponent,
        transform::{Position, Rotation, Scale, Vec3, Visible},
    },
    entity::{entity_registry::EntityRegistry, error::EntityNotRegisteredError},
    ownership::{
        error::OwnershipError,
        ownership_arbiter::OwnershipArbiter,
        ownership_state::{ConnectionStatus, OwnershipState, OwnershipTransition},
    },
    physics::{
        physics_bridge::{CollisionData, NoPhysicsBridge, PhysicsBridge},
        physics_payload::PhysicsPayload,
        physics_state::PhysicsState,
    },
    schema::{
        component_schema::ComponentSchema,
        descriptor::{ChildSchema, ComponentDescriptor, ComponentKey, CHILD_KEY_SEPARATOR},
        schema_registry::SchemaRegistry,
    },
    snapshot::{
        component_snapshot::{capture, Snapshot},
        dirty_differ::diff,
        snapshot_cache::SnapshotCache,
    },
    world_type::{WorldMutType, WorldRefType},
};

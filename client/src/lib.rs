//! # Netshare Client
//! The peer side of netshare: a [`SyncEngine`] that owns every networked
//! entity of this peer, streams owned state to the other peers, applies
//! what they send back and arbitrates which peer owns each shared entity.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use netshare_shared as shared;

mod engine;
mod error;
mod events;
mod session;
mod transport;
mod world;

pub use engine::SyncEngine;
pub use error::SyncEngineError;
pub use events::{EngineEvent, EngineEvents};
pub use session::SessionContext;
pub use transport::{SendError, Transport};
pub use world::{
    entity_options::{EntityKind, EntityOptions},
    entity_record::EntityRecord,
    pending_spawns::PendingSpawns,
    readiness_waitlist::ReadinessWaitlist,
    subscriptions::{Subscription, Subscriptions},
};

use thiserror::Error;

use netshare_shared::{EntityNotRegisteredError, OwnershipError, PacketError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncEngineError {
    #[error(transparent)]
    EntityNotRegistered(#[from] EntityNotRegisteredError),
    #[error(transparent)]
    Ownership(#[from] OwnershipError),
    #[error(transparent)]
    Packet(#[from] PacketError),
    #[error("Entity {network_id} is not shared, its ownership cannot move between peers")]
    NotShared { network_id: String },
}

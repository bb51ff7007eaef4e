use thiserror::Error;

/// A network id was looked up that no local entity is bound to
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No local entity is registered for network id {network_id}")]
pub struct EntityNotRegisteredError {
    pub network_id: String,
}

use thiserror::Error;

/// Errors that can occur when requesting an ownership transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipError {
    /// Ownership was requested for an entity this peer already owns
    #[error("Cannot take ownership of entity {network_id} - already owned by this peer")]
    AlreadyOwned { network_id: String },

    /// Ownership release was requested for an entity this peer does not own
    #[error("Cannot remove ownership of entity {network_id} - not owned by this peer (owner: {owner:?})")]
    NotOwned { network_id: String, owner: String },

    /// Ownership was requested before the session identity is known
    #[error("Cannot {operation} for entity {network_id} - session identity not yet known")]
    IdentityUnknown {
        network_id: String,
        operation: &'static str,
    },
}

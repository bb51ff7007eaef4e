use thiserror::Error;

/// Errors that can occur during protocol operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolError {
    /// Protocol is locked and cannot be modified
    #[error("Protocol is already locked and cannot be modified. Protocol.lock() has been called and no further changes are allowed")]
    AlreadyLocked,

    /// Update rate must be a positive number of syncs per second whose
    /// interval fits a `Duration`
    #[error("Update rate must be a positive number of syncs per second, got {update_rate}")]
    InvalidUpdateRate { update_rate: f32 },
}

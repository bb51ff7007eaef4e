use log::info;

use crate::{NetworkId, OwnerId};

use super::{
    error::OwnershipError,
    ownership_state::{ConnectionStatus, OwnershipState, OwnershipTransition},
};

/// Decides who may author writes for one entity
#[derive(Clone, Debug, Default)]
pub struct OwnershipArbiter {
    owner: OwnerId,
    takeover: bool,
}

impl OwnershipArbiter {
    pub fn new(owner: impl Into<OwnerId>) -> Self {
        Self {
            owner: owner.into(),
            takeover: false,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn set_owner(&mut self, owner: impl Into<OwnerId>) {
        self.owner = owner.into();
    }

    pub fn state(&self, connection: &dyn ConnectionStatus) -> OwnershipState {
        OwnershipState::resolve(&self.owner, connection)
    }

    pub fn is_mine(&self, connection: &dyn ConnectionStatus) -> bool {
        self.state(connection).is_mine()
    }

    /// Whether the next outgoing full sync must carry the takeover flag
    pub fn takeover_pending(&self) -> bool {
        self.takeover
    }

    /// Reads and clears the takeover flag, so exactly one packet carries it
    pub fn consume_takeover(&mut self) -> bool {
        std::mem::take(&mut self.takeover)
    }

    /// Makes `client_id` the owner and arms the takeover flag
    pub fn try_take_ownership(
        &mut self,
        network_id: &NetworkId,
        client_id: &str,
        connection: &dyn ConnectionStatus,
    ) -> Result<OwnershipTransition, OwnershipError> {
        if self.is_mine(connection) {
            return Err(OwnershipError::AlreadyOwned {
                network_id: network_id.to_string(),
            });
        }

        self.owner = client_id.to_string();
        self.takeover = true;

        info!("OwnershipArbiter: Taken ownership of {}", network_id);
        Ok(OwnershipTransition::Taken)
    }

    /// Leaves the entity unowned
    pub fn try_remove_ownership(
        &mut self,
        network_id: &NetworkId,
        connection: &dyn ConnectionStatus,
    ) -> Result<OwnershipTransition, OwnershipError> {
        if !self.is_mine(connection) {
            return Err(OwnershipError::NotOwned {
                network_id: network_id.to_string(),
                owner: self.owner.clone(),
            });
        }

        self.owner.clear();
        self.takeover = false;

        info!("OwnershipArbiter: Removed ownership of {}", network_id);
        Ok(OwnershipTransition::Removed)
    }

    /// Reconciles the owner named in a received packet with local state.
    /// A takeover-flagged claim always wins over local ownership; an
    /// unflagged claim only updates the owner of entities this peer does
    /// not own.
    pub fn receive_claim(
        &mut self,
        network_id: &NetworkId,
        client_id: Option<&str>,
        connection: &dyn ConnectionStatus,
        remote_owner: &str,
        remote_takeover: bool,
    ) -> Option<OwnershipTransition> {
        let owner_changed = self.owner != remote_owner;
        let owner_is_me = client_id == Some(remote_owner);
        let is_mine = self.is_mine(connection);

        if is_mine && !owner_is_me && owner_changed && remote_takeover {
            self.owner = remote_owner.to_string();
            self.takeover = false;
            info!(
                "OwnershipArbiter: Friendly takeover of {} by {:?}",
                network_id, remote_owner
            );
            return Some(OwnershipTransition::Lost {
                new_owner: self.owner.clone(),
            });
        }

        if !is_mine && owner_changed {
            self.owner = remote_owner.to_string();
            info!(
                "OwnershipArbiter: Updated owner of {} to {:?}",
                network_id, remote_owner
            );
            return Some(OwnershipTransition::Changed {
                new_owner: self.owner.clone(),
            });
        }

        None
    }
}

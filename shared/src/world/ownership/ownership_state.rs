use crate::OwnerId;

/// Answers whether an owner id refers to this peer while it is connected
pub trait ConnectionStatus {
    fn is_owned_by_local_and_connected(&self, owner: &str) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OwnershipState {
    Unowned,
    OwnedByMe,
    OwnedByRemote(OwnerId),
}

impl OwnershipState {
    pub fn resolve(owner: &str, connection: &dyn ConnectionStatus) -> Self {
        if owner.is_empty() {
            Self::Unowned
        } else if connection.is_owned_by_local_and_connected(owner) {
            Self::OwnedByMe
        } else {
            Self::OwnedByRemote(owner.to_string())
        }
    }

    pub fn is_mine(&self) -> bool {
        matches!(self, Self::OwnedByMe)
    }
}

/// Observable result of an ownership change
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OwnershipTransition {
    /// This peer took ownership voluntarily
    Taken,
    /// This peer gave ownership up, leaving the entity unowned
    Removed,
    /// Another peer forced a takeover of an entity this peer owned
    Lost { new_owner: OwnerId },
    /// The recorded owner changed while this peer was not the owner
    Changed { new_owner: OwnerId },
}

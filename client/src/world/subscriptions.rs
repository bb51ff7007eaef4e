use std::collections::HashSet;

/// Event sources an entity record currently listens to
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Subscription {
    /// Inbound component updates from the owning peer are applied
    RemoteUpdates,
    /// Host-triggered `sync` / `syncAll` requests are honored
    OwnerSync,
    /// Interaction signals may take or release ownership
    OwnershipSignals,
}

#[derive(Clone, Debug, Default)]
pub struct Subscriptions {
    active: HashSet<Subscription>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if already subscribed
    pub fn subscribe(&mut self, subscription: Subscription) -> bool {
        self.active.insert(subscription)
    }

    /// Returns false if not subscribed
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.active.remove(&subscription)
    }

    pub fn is_subscribed(&self, subscription: Subscription) -> bool {
        self.active.contains(&subscription)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

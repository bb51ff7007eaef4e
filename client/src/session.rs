use log::info;

use netshare_shared::{OwnerId, Protocol, SyncConfig};

use crate::transport::Transport;

/// Everything an engine needs to know about the session it runs in: who
/// this peer is, the locked protocol, and its two external collaborators.
pub struct SessionContext<T: Transport, P> {
    client_id: Option<OwnerId>,
    protocol: Protocol,
    transport: T,
    physics: P,
}

impl<T: Transport, P> SessionContext<T, P> {
    pub fn new(mut protocol: Protocol, transport: T, physics: P) -> Self {
        if !protocol.is_locked() {
            protocol.lock();
        }

        Self {
            client_id: None,
            protocol,
            transport,
            physics,
        }
    }

    /// `None` until the transport reports this peer's identity
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn has_identity(&self) -> bool {
        self.client_id.is_some()
    }

    pub(crate) fn set_client_id(&mut self, client_id: impl Into<OwnerId>) {
        let client_id = client_id.into();
        info!("SessionContext: client id is now {:?}", client_id);
        self.client_id = Some(client_id);
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    pub fn config(&self) -> &SyncConfig {
        &self.protocol.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }
}

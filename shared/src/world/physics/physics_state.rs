use log::debug;

use super::{physics_bridge::PhysicsBridge, physics_payload::PhysicsPayload};

/// Receive-side physics bookkeeping for one entity
#[derive(Clone, Debug, Default)]
pub struct PhysicsState {
    last_applied_timestamp: Option<f64>,
    has_constraint: bool,
}

impl PhysicsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_applied_timestamp(&self) -> Option<f64> {
        self.last_applied_timestamp
    }

    pub fn has_constraint(&self) -> bool {
        self.has_constraint
    }

    /// Payloads not newer than the last applied one arrived out of order
    pub fn is_stale(&self, payload: &PhysicsPayload) -> bool {
        matches!(self.last_applied_timestamp, Some(last) if payload.timestamp <= last)
    }

    /// Applies a received payload through the bridge unless it is stale.
    /// Constrained bodies are interpolated towards the payload while asleep,
    /// everything else is written directly. Returns whether it was applied.
    pub fn apply<E, P: PhysicsBridge<E> + ?Sized>(
        &mut self,
        bridge: &mut P,
        entity: &E,
        payload: &PhysicsPayload,
        use_interpolation: bool,
    ) -> bool {
        if self.is_stale(payload) {
            debug!(
                "PhysicsState: dropping stale payload {} (last applied {:?})",
                payload.timestamp, self.last_applied_timestamp
            );
            return false;
        }

        if !payload.has_constraint || !use_interpolation {
            bridge.detach_physics_lerp(entity);
            bridge.wake_up(entity);
            bridge.update_physics(entity, payload);
        } else {
            bridge.sleep(entity);
            bridge.attach_physics_lerp(entity, payload);
        }

        self.last_applied_timestamp = Some(payload.timestamp);
        self.has_constraint = payload.has_constraint;
        true
    }

    pub fn reset(&mut self) {
        self.last_applied_timestamp = None;
        self.has_constraint = false;
    }
}

use super::physics_payload::PhysicsPayload;

/// Participants of a collision, as reported by the physics engine
pub struct CollisionData<E, B> {
    /// The entity that was hit
    pub entity: E,
    /// The physics body of the entity that was hit
    pub body: B,
}

/// The sync engine's view of the host physics simulation. The engine only
/// sequences these calls; all simulation work stays on the host.
pub trait PhysicsBridge<E> {
    /// Host-specific collision event type
    type Collision;
    /// Host-specific physics body handle
    type Body;

    fn physics_data(&self, entity: &E) -> Option<PhysicsPayload>;

    fn update_physics(&mut self, entity: &E, payload: &PhysicsPayload);

    fn attach_physics_lerp(&mut self, entity: &E, payload: &PhysicsPayload);

    fn detach_physics_lerp(&mut self, entity: &E);

    fn sleep(&mut self, entity: &E);

    fn wake_up(&mut self, entity: &E);

    /// `None` when the event lacks the hit entity or its body
    fn collision_data(&self, collision: &Self::Collision) -> Option<CollisionData<E, Self::Body>>;

    /// Whether `entity` wins a transfer-priority comparison against `body`
    fn is_stronger_than(&self, entity: &E, body: &Self::Body) -> bool;
}

/// Bridge for hosts that do not run a physics simulation
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPhysicsBridge;

impl<E> PhysicsBridge<E> for NoPhysicsBridge {
    type Collision = ();
    type Body = ();

    fn physics_data(&self, _entity: &E) -> Option<PhysicsPayload> {
        None
    }

    fn update_physics(&mut self, _entity: &E, _payload: &PhysicsPayload) {}

    fn attach_physics_lerp(&mut self, _entity: &E, _payload: &PhysicsPayload) {}

    fn detach_physics_lerp(&mut self, _entity: &E) {}

    fn sleep(&mut self, _entity: &E) {}

    fn wake_up(&mut self, _entity: &E) {}

    fn collision_data(&self, _collision: &()) -> Option<CollisionData<E, ()>> {
        None
    }

    fn is_stronger_than(&self, _entity: &E, _body: &()) -> bool {
        false
    }
}

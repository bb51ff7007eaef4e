/// Physics bridge double that records every call the engine makes

use std::collections::HashMap;

use netshare_shared::{CollisionData, PhysicsBridge, PhysicsPayload};

use crate::test_world::TestEntity;

#[derive(Clone, Debug, PartialEq)]
pub enum PhysicsCall {
    Update(TestEntity, f64),
    AttachLerp(TestEntity, f64),
    DetachLerp(TestEntity),
    Sleep(TestEntity),
    WakeUp(TestEntity),
}

/// Collision event as the test physics engine reports it
#[derive(Clone, Debug, Default)]
pub struct TestCollision {
    pub hit: Option<TestEntity>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TestBody {
    pub mass: f64,
}

#[derive(Default)]
pub struct TestPhysics {
    bodies: HashMap<TestEntity, PhysicsPayload>,
    masses: HashMap<TestEntity, f64>,
    calls: Vec<PhysicsCall>,
}

impl TestPhysics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_body(&mut self, entity: &TestEntity, payload: PhysicsPayload) {
        self.bodies.insert(*entity, payload);
    }

    pub fn body(&self, entity: &TestEntity) -> Option<&PhysicsPayload> {
        self.bodies.get(entity)
    }

    pub fn set_mass(&mut self, entity: &TestEntity, mass: f64) {
        self.masses.insert(*entity, mass);
    }

    pub fn calls(&self) -> &[PhysicsCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<PhysicsCall> {
        std::mem::take(&mut self.calls)
    }

    fn mass(&self, entity: &TestEntity) -> f64 {
        self.masses.get(entity).copied().unwrap_or(1.0)
    }
}

impl PhysicsBridge<TestEntity> for TestPhysics {
    type Collision = TestCollision;
    type Body = TestBody;

    fn physics_data(&self, entity: &TestEntity) -> Option<PhysicsPayload> {
        self.bodies.get(entity).cloned()
    }

    fn update_physics(&mut self, entity: &TestEntity, payload: &PhysicsPayload) {
        self.bodies.insert(*entity, payload.clone());
        self.calls.push(PhysicsCall::Update(*entity, payload.timestamp));
    }

    fn attach_physics_lerp(&mut self, entity: &TestEntity, payload: &PhysicsPayload) {
        self.calls
            .push(PhysicsCall::AttachLerp(*entity, payload.timestamp));
    }

    fn detach_physics_lerp(&mut self, entity: &TestEntity) {
        self.calls.push(PhysicsCall::DetachLerp(*entity));
    }

    fn sleep(&mut self, entity: &TestEntity) {
        self.calls.push(PhysicsCall::Sleep(*entity));
    }

    fn wake_up(&mut self, entity: &TestEntity) {
        self.calls.push(PhysicsCall::WakeUp(*entity));
    }

    fn collision_data(
        &self,
        collision: &TestCollision,
    ) -> Option<CollisionData<TestEntity, TestBody>> {
        let entity = collision.hit?;
        Some(CollisionData {
            entity,
            body: TestBody {
                mass: self.mass(&entity),
            },
        })
    }

    fn is_stronger_than(&self, entity: &TestEntity, body: &TestBody) -> bool {
        self.mass(entity) > body.mass
    }
}

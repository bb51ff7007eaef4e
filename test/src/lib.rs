pub mod helpers;
pub mod test_physics;
pub mod test_world;

pub use helpers::*;
pub use local_transport::{LocalTransport, SentPacket};
pub use test_physics::{PhysicsCall, TestBody, TestCollision, TestPhysics};
pub use test_world::{TestEntity, TestWorld};

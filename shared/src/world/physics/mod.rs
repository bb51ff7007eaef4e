pub mod physics_bridge;
pub mod physics_payload;
pub mod physics_state;

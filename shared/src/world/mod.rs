pub mod component;
pub mod entity;
pub mod ownership;
pub mod physics;
pub mod schema;
pub mod snapshot;
pub mod world_type;

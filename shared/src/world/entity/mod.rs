pub mod entity_registry;
pub mod error;

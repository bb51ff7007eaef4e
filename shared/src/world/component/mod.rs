pub mod component_kinds;
pub mod error;
pub mod syncable;
pub mod transform;

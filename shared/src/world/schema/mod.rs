pub mod component_schema;
pub mod descriptor;
pub mod schema_registry;

use std::collections::HashMap;

use log::info;

use super::component_schema::ComponentSchema;

/// Template id to component schema lookup, shared by every peer of a session
pub struct SchemaRegistry {
    schemas: HashMap<String, ComponentSchema>,
    default_schema: ComponentSchema,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
            default_schema: ComponentSchema::transform(),
        }
    }

    /// Registers the schema for a template, returning the one it replaced
    pub fn add_schema(&mut self, template: &str, schema: ComponentSchema) -> Option<ComponentSchema> {
        info!("SchemaRegistry: Registering schema for template {:?}", template);
        self.schemas.insert(template.to_string(), schema)
    }

    pub fn has_schema(&self, template: &str) -> bool {
        self.schemas.contains_key(template)
    }

    pub fn set_default_schema(&mut self, schema: ComponentSchema) {
        self.default_schema = schema;
    }

    /// Schema registered for `template`, or the default schema
    pub fn schema(&self, template: &str) -> &ComponentSchema {
        self.schemas.get(template).unwrap_or(&self.default_schema)
    }
}

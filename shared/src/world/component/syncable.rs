use serde_json::Value;

use super::error::ComponentError;

/// A component whose state can be read and written as a JSON value
pub trait SyncableComponent {
    fn get_data(&self) -> Value;

    fn set_data(&mut self, data: Value) -> Result<(), ComponentError>;

    /// Reads a single field of the component's data
    fn get_property(&self, property: &str) -> Option<Value> {
        self.get_data().get(property).cloned()
    }

    /// Overwrites a single field, leaving the rest of the data untouched
    fn set_property(&mut self, property: &str, value: Value) -> Result<(), ComponentError> {
        let mut data = self.get_data();
        let Value::Object(fields) = &mut data else {
            return Err(ComponentError::NotAnObject {
                property: property.to_string(),
            });
        };
        fields.insert(property.to_string(), value);
        self.set_data(data)
    }
}

use thiserror::Error;

/// Errors that can occur during component operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// Component name not registered in the protocol
    #[error("Component not registered with Protocol. Must call `add_component()` during protocol initialization. Component: {component_name}")]
    ComponentNotRegistered { component_name: String },

    /// Received data could not be applied to the component
    #[error("Component {component_name} rejected data: {reason}")]
    InvalidData {
        component_name: &'static str,
        reason: String,
    },

    /// A single-property write targeted a component whose data is not an object
    #[error("Component data is not an object, cannot set property '{property}'")]
    NotAnObject { property: String },
}

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{error::ComponentError, syncable::SyncableComponent};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn to_value(self) -> Value {
        json!({ "x": self.x, "y": self.y, "z": self.z })
    }

    fn from_value(component_name: &'static str, data: Value) -> Result<Self, ComponentError> {
        serde_json::from_value(data).map_err(|err| ComponentError::InvalidData {
            component_name,
            reason: err.to_string(),
        })
    }
}

macro_rules! vec3_component {
    ($(#[$meta:meta])* $component:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        pub struct $component(pub Vec3);

        impl $component {
            pub const NAME: &'static str = $name;

            pub fn new(x: f64, y: f64, z: f64) -> Self {
                Self(Vec3::new(x, y, z))
            }
        }

        impl SyncableComponent for $component {
            fn get_data(&self) -> Value {
                self.0.to_value()
            }

            fn set_data(&mut self, data: Value) -> Result<(), ComponentError> {
                self.0 = Vec3::from_value(Self::NAME, data)?;
                Ok(())
            }
        }
    };
}

vec3_component!(
    /// World-space position of an entity
    Position,
    "position"
);
vec3_component!(
    /// Euler rotation of an entity, in degrees
    Rotation,
    "rotation"
);
vec3_component!(Scale, "scale");

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visible(pub bool);

impl Visible {
    pub const NAME: &'static str = "visible";
}

impl Default for Visible {
    fn default() -> Self {
        Self(true)
    }
}

impl SyncableComponent for Visible {
    fn get_data(&self) -> Value {
        Value::Bool(self.0)
    }

    fn set_data(&mut self, data: Value) -> Result<(), ComponentError> {
        match data {
            Value::Bool(visible) => {
                self.0 = visible;
                Ok(())
            }
            other => Err(ComponentError::InvalidData {
                component_name: Self::NAME,
                reason: format!("expected a boolean, got {}", other),
            }),
        }
    }
}

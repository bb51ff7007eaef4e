use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Physics body state carried alongside a full sync
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsPayload {
    /// Sender-side monotonic time the state was sampled at
    pub timestamp: f64,
    /// Whether a constraint currently binds the body
    #[serde(default)]
    pub has_constraint: bool,
    /// Engine-specific body state (velocities, pose, ...)
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl PhysicsPayload {
    pub fn new(timestamp: f64) -> Self {
        Self {
            timestamp,
            has_constraint: false,
            body: Map::new(),
        }
    }

    pub fn with_constraint(mut self, has_constraint: bool) -> Self {
        self.has_constraint = has_constraint;
        self
    }

    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.body.insert(name.to_string(), value);
        self
    }
}

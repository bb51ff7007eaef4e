use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    world::{physics::physics_payload::PhysicsPayload, snapshot::component_snapshot::Snapshot},
    NetworkId, OwnerId,
};

use super::{error::PacketError, wire, FULL_MARKER};

const PACKET: &str = "full";

// Field order is the wire order
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FullWire<'a> {
    #[serde(rename = "0")]
    marker: u64,
    network_id: &'a str,
    owner: &'a str,
    takeover: bool,
    template: &'a str,
    show_template: bool,
    parent: Option<&'a str>,
    components: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    physics: Option<&'a PhysicsPayload>,
}

/// Uncompressed entity state, keyed by component name
#[derive(Clone, Debug, PartialEq)]
pub struct EntityData {
    pub network_id: NetworkId,
    pub owner: OwnerId,
    /// Set on exactly one packet after a voluntary takeover
    pub takeover: bool,
    pub template: String,
    pub show_template: bool,
    pub parent: Option<NetworkId>,
    pub components: Snapshot,
    pub physics: Option<PhysicsPayload>,
}

impl EntityData {
    pub fn new(network_id: NetworkId, owner: impl Into<OwnerId>, template: impl Into<String>) -> Self {
        Self {
            network_id,
            owner: owner.into(),
            takeover: false,
            template: template.into(),
            show_template: true,
            parent: None,
            components: Snapshot::new(),
            physics: None,
        }
    }

    /// `{"0": 0, networkId, owner, takeover, template, showTemplate, parent, components[, physics]}`
    pub fn to_wire(&self) -> Result<Value, PacketError> {
        let fields = FullWire {
            marker: FULL_MARKER,
            network_id: self.network_id.as_str(),
            owner: &self.owner,
            takeover: self.takeover,
            template: &self.template,
            show_template: self.show_template,
            parent: self.parent.as_ref().map(NetworkId::as_str),
            components: self.components.as_map(),
            physics: self.physics.as_ref(),
        };
        serde_json::to_value(fields).map_err(|err| PacketError::SerializationFailed {
            what: "full sync packet",
            reason: err.to_string(),
        })
    }

    pub fn from_wire(value: &Value) -> Result<Self, PacketError> {
        let Value::Object(fields) = value else {
            return Err(PacketError::UnexpectedShape {
                packet: PACKET,
                expected: "an object",
            });
        };

        let marker = wire::marker(fields.get("0"))?;
        if marker != FULL_MARKER {
            return Err(PacketError::UnknownMarker {
                marker: marker.to_string(),
            });
        }

        let network_id = NetworkId::from(wire::required_str(fields, PACKET, "networkId")?);
        let owner = wire::str_or_empty(fields.get("owner"), PACKET, "owner")?;
        let takeover = wire::bool_or(fields.get("takeover"), false, PACKET, "takeover")?;
        let template = wire::str_or_empty(fields.get("template"), PACKET, "template")?;
        let show_template = wire::bool_or(fields.get("showTemplate"), true, PACKET, "showTemplate")?;
        let parent = wire::optional_network_id(fields.get("parent"), PACKET, "parent")?;

        let components = match fields.get("components") {
            None | Some(Value::Null) => Snapshot::new(),
            Some(Value::Object(components)) => Snapshot::from_map(components.clone()),
            Some(_) => {
                return Err(PacketError::InvalidField {
                    packet: PACKET,
                    field: "components",
                    expected: "an object",
                })
            }
        };

        let physics = match fields.get("physics") {
            None | Some(Value::Null) => None,
            Some(physics) => Some(serde_json::from_value(physics.clone()).map_err(|_| {
                PacketError::InvalidField {
                    packet: PACKET,
                    field: "physics",
                    expected: "a physics payload",
                }
            })?),
        };

        Ok(Self {
            network_id,
            owner,
            takeover,
            template,
            show_template,
            parent,
            components,
            physics,
        })
    }
}

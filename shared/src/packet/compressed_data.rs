use std::collections::BTreeMap;

use log::warn;
use serde_json::{Map, Value};

use crate::{
    world::{schema::component_schema::ComponentSchema, snapshot::component_snapshot::Snapshot},
    NetworkId, OwnerId,
};

use super::{entity_data::EntityData, error::PacketError, wire, COMPRESSED_MARKER};

const PACKET: &str = "compressed";

/// Entity state with component names replaced by their schema position.
/// Only meaningful to a receiver holding the sender's exact schema order.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressedEntityData {
    pub network_id: NetworkId,
    pub owner: OwnerId,
    pub parent: Option<NetworkId>,
    pub template: String,
    pub components: BTreeMap<usize, Value>,
}

impl CompressedEntityData {
    /// Replaces each component key of `data` by its position in `schema`.
    /// The takeover flag and physics payload are not carried.
    pub fn compress(data: &EntityData, schema: &ComponentSchema) -> Self {
        let mut components = BTreeMap::new();
        for (position, descriptor) in schema.iter().enumerate() {
            if let Some(value) = data.components.get(&descriptor.key()) {
                components.insert(position, value.clone());
            }
        }

        Self {
            network_id: data.network_id.clone(),
            owner: data.owner.clone(),
            parent: data.parent.clone(),
            template: data.template.clone(),
            components,
        }
    }

    /// Re-expands positions into component keys using the local `schema`
    pub fn decompress(&self, schema: &ComponentSchema) -> EntityData {
        let mut components = Snapshot::new();
        for (position, value) in &self.components {
            let Some(descriptor) = schema.get(*position) else {
                warn!(
                    "Compressed packet for {} names schema position {} but the local schema only has {} entries",
                    self.network_id,
                    position,
                    schema.len()
                );
                continue;
            };
            components.insert(&descriptor.key(), value.clone());
        }

        let mut data = EntityData::new(
            self.network_id.clone(),
            self.owner.clone(),
            self.template.clone(),
        );
        data.parent = self.parent.clone();
        data.components = components;
        data
    }

    /// `[1, networkId, owner, parent, template, {position: value}]`
    pub fn to_wire(&self) -> Value {
        let mut components = Map::new();
        for (position, value) in &self.components {
            components.insert(position.to_string(), value.clone());
        }

        Value::Array(vec![
            Value::from(COMPRESSED_MARKER),
            Value::String(self.network_id.as_str().to_string()),
            Value::String(self.owner.clone()),
            wire::network_id_value(self.parent.as_ref()),
            Value::String(self.template.clone()),
            Value::Object(components),
        ])
    }

    pub fn from_wire(value: &Value) -> Result<Self, PacketError> {
        let Value::Array(elements) = value else {
            return Err(PacketError::UnexpectedShape {
                packet: PACKET,
                expected: "an array",
            });
        };
        let [marker, network_id, owner, parent, template, components] = elements.as_slice() else {
            return Err(PacketError::UnexpectedShape {
                packet: PACKET,
                expected: "an array of 6 elements",
            });
        };

        let marker = wire::marker(Some(marker))?;
        if marker != COMPRESSED_MARKER {
            return Err(PacketError::UnknownMarker {
                marker: marker.to_string(),
            });
        }

        let network_id = NetworkId::from(wire::as_str(network_id, PACKET, "networkId")?);
        let owner = wire::str_or_empty(Some(owner), PACKET, "owner")?;
        let parent = wire::optional_network_id(Some(parent), PACKET, "parent")?;
        let template = wire::str_or_empty(Some(template), PACKET, "template")?;

        let Value::Object(indexed) = components else {
            return Err(PacketError::InvalidField {
                packet: PACKET,
                field: "components",
                expected: "an object",
            });
        };
        let mut components = BTreeMap::new();
        for (index, value) in indexed {
            let position = index
                .parse::<usize>()
                .map_err(|_| PacketError::InvalidComponentIndex {
                    index: index.clone(),
                })?;
            components.insert(position, value.clone());
        }

        Ok(Self {
            network_id,
            owner,
            parent,
            template,
            components,
        })
    }
}

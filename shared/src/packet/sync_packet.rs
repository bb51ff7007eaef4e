use serde_json::Value;

use crate::{world::schema::component_schema::ComponentSchema, NetworkId};

use super::{compressed_data::CompressedEntityData, entity_data::EntityData, error::PacketError};

/// An entity update in either of its two wire forms
#[derive(Clone, Debug, PartialEq)]
pub enum SyncPacket {
    Full(EntityData),
    Compressed(CompressedEntityData),
}

impl SyncPacket {
    pub fn network_id(&self) -> &NetworkId {
        match self {
            SyncPacket::Full(data) => &data.network_id,
            SyncPacket::Compressed(data) => &data.network_id,
        }
    }

    pub fn template(&self) -> &str {
        match self {
            SyncPacket::Full(data) => &data.template,
            SyncPacket::Compressed(data) => &data.template,
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, SyncPacket::Compressed(_))
    }

    /// Full entity data, expanding compressed positions against `schema`
    pub fn into_entity_data(self, schema: &ComponentSchema) -> EntityData {
        match self {
            SyncPacket::Full(data) => data,
            SyncPacket::Compressed(data) => data.decompress(schema),
        }
    }

    pub fn to_wire(&self) -> Result<Value, PacketError> {
        match self {
            SyncPacket::Full(data) => data.to_wire(),
            SyncPacket::Compressed(data) => Ok(data.to_wire()),
        }
    }

    /// Objects are full packets, arrays are compressed packets
    pub fn from_wire(value: &Value) -> Result<Self, PacketError> {
        match value {
            Value::Object(_) => EntityData::from_wire(value).map(SyncPacket::Full),
            Value::Array(_) => CompressedEntityData::from_wire(value).map(SyncPacket::Compressed),
            _ => Err(PacketError::UnexpectedShape {
                packet: "sync",
                expected: "an object or an array",
            }),
        }
    }
}

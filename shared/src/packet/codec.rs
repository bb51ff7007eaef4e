use serde_json::Value;

use super::{
    data_type::DataType, error::PacketError, remove_data::RemoveData, sync_packet::SyncPacket,
};

/// A decoded inbound payload, routed by its data type
#[derive(Clone, Debug, PartialEq)]
pub enum InboundPacket {
    Update(SyncPacket),
    Remove(RemoveData),
}

/// Turns packets into the bytes handed to the transport, and back
pub struct PacketCodec;

impl PacketCodec {
    pub fn encode_sync(packet: &SyncPacket) -> Result<Vec<u8>, PacketError> {
        Self::to_bytes(&packet.to_wire()?, "sync packet")
    }

    pub fn encode_remove(packet: &RemoveData) -> Result<Vec<u8>, PacketError> {
        Self::to_bytes(&packet.to_wire()?, "remove packet")
    }

    pub fn decode_sync(payload: &[u8]) -> Result<SyncPacket, PacketError> {
        SyncPacket::from_wire(&Self::from_bytes(payload)?)
    }

    pub fn decode_remove(payload: &[u8]) -> Result<RemoveData, PacketError> {
        RemoveData::from_wire(&Self::from_bytes(payload)?)
    }

    pub fn decode(data_type: DataType, payload: &[u8]) -> Result<InboundPacket, PacketError> {
        match data_type {
            DataType::EntityUpdate => Self::decode_sync(payload).map(InboundPacket::Update),
            DataType::EntityRemoved => Self::decode_remove(payload).map(InboundPacket::Remove),
        }
    }

    fn to_bytes(value: &Value, what: &'static str) -> Result<Vec<u8>, PacketError> {
        serde_json::to_vec(value).map_err(|err| PacketError::SerializationFailed {
            what,
            reason: err.to_string(),
        })
    }

    fn from_bytes(payload: &[u8]) -> Result<Value, PacketError> {
        serde_json::from_slice(payload).map_err(|err| PacketError::MalformedJson {
            payload_size: payload.len(),
            reason: err.to_string(),
        })
    }
}

use serde::Serialize;
use serde_json::Value;

use crate::NetworkId;

use super::{error::PacketError, wire};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoveWire<'a> {
    network_id: &'a str,
}

const PACKET: &str = "remove";

/// Announces that the sender removed an entity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoveData {
    pub network_id: NetworkId,
}

impl RemoveData {
    pub fn new(network_id: NetworkId) -> Self {
        Self { network_id }
    }

    pub fn to_wire(&self) -> Result<Value, PacketError> {
        let fields = RemoveWire {
            network_id: self.network_id.as_str(),
        };
        serde_json::to_value(fields).map_err(|err| PacketError::SerializationFailed {
            what: "remove packet",
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
        let network_id = wire::required_str(fields, PACKET, "networkId")?;
        Ok(Self::new(NetworkId::from(network_id)))
    }
}

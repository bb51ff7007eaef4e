use serde_json::{Map, Value};

use crate::NetworkId;

use super::error::PacketError;

pub(crate) fn required_str<'a>(
    fields: &'a Map<String, Value>,
    packet: &'static str,
    field: &'static str,
) -> Result<&'a str, PacketError> {
    match fields.get(field) {
        None => Err(PacketError::MissingField { packet, field }),
        Some(value) => as_str(value, packet, field),
    }
}

pub(crate) fn as_str<'a>(
    value: &'a Value,
    packet: &'static str,
    field: &'static str,
) -> Result<&'a str, PacketError> {
    value.as_str().ok_or(PacketError::InvalidField {
        packet,
        field,
        expected: "a string",
    })
}

/// Absent and `null` both read as the empty string
pub(crate) fn str_or_empty(
    value: Option<&Value>,
    packet: &'static str,
    field: &'static str,
) -> Result<String, PacketError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(value) => as_str(value, packet, field).map(str::to_string),
    }
}

pub(crate) fn bool_or(
    value: Option<&Value>,
    default: bool,
    packet: &'static str,
    field: &'static str,
) -> Result<bool, PacketError> {
    match value {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(PacketError::InvalidField {
            packet,
            field,
            expected: "a boolean",
        }),
    }
}

pub(crate) fn optional_network_id(
    value: Option<&Value>,
    packet: &'static str,
    field: &'static str,
) -> Result<Option<NetworkId>, PacketError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => as_str(value, packet, field).map(|id| Some(NetworkId::from(id))),
    }
}

pub(crate) fn network_id_value(network_id: Option<&NetworkId>) -> Value {
    match network_id {
        Some(network_id) => Value::String(network_id.as_str().to_string()),
        None => Value::Null,
    }
}

pub(crate) fn marker(value: Option<&Value>) -> Result<u64, PacketError> {
    match value {
        Some(Value::Number(number)) => number.as_u64().ok_or_else(|| PacketError::UnknownMarker {
            marker: number.to_string(),
        }),
        Some(other) => Err(PacketError::UnknownMarker {
            marker: other.to_string(),
        }),
        None => Err(PacketError::UnknownMarker {
            marker: "<missing>".to_string(),
        }),
    }
}

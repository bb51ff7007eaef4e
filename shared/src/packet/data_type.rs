use super::error::PacketError;

/// Tag broadcast alongside every payload so receivers can route it
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Full or compressed entity state
    EntityUpdate,
    /// The entity was removed by its creator
    EntityRemoved,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::EntityUpdate => "u",
            DataType::EntityRemoved => "r",
        }
    }

    pub fn try_from_str(data_type: &str) -> Result<Self, PacketError> {
        match data_type {
            "u" => Ok(DataType::EntityUpdate),
            "r" => Ok(DataType::EntityRemoved),
            other => Err(PacketError::UnknownDataType {
                data_type: other.to_string(),
            }),
        }
    }
}

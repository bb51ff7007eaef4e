use thiserror::Error;

/// Errors that can occur while reading or writing sync packets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    /// Bytes were not valid JSON
    #[error("Packet of {payload_size} bytes is not valid JSON: {reason}")]
    MalformedJson { payload_size: usize, reason: String },

    /// A value could not be turned into JSON
    #[error("Failed to serialize {what}: {reason}")]
    SerializationFailed { what: &'static str, reason: String },

    /// Top-level value had an unexpected shape
    #[error("Expected {expected} for {packet} packet")]
    UnexpectedShape {
        packet: &'static str,
        expected: &'static str,
    },

    /// Leading marker did not identify a known packet form
    #[error("Unknown packet marker {marker}")]
    UnknownMarker { marker: String },

    /// A required field was absent
    #[error("{packet} packet is missing field '{field}'")]
    MissingField {
        packet: &'static str,
        field: &'static str,
    },

    /// A field was present but of the wrong JSON type
    #[error("{packet} packet field '{field}' must be {expected}")]
    InvalidField {
        packet: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    /// Compressed component index was not a non-negative integer
    #[error("Compressed component index '{index}' is not a schema position")]
    InvalidComponentIndex { index: String },

    /// Message type tag was not recognised
    #[error("Unknown data type '{data_type}'")]
    UnknownDataType { data_type: String },
}

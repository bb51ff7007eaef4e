pub mod codec;
pub mod compressed_data;
pub mod data_type;
pub mod entity_data;
pub mod error;
pub mod remove_data;
pub mod sync_packet;
mod wire;

/// First element of a full packet
pub const FULL_MARKER: u64 = 0;
/// First element of a compressed packet
pub const COMPRESSED_MARKER: u64 = 1;

pub mod assertions;
pub mod packet_exchange;
pub mod test_protocol;

pub use packet_exchange::{exchange_packets, tick_and_exchange};
pub use test_peer::{TestEngine, TestPeer};
pub use test_protocol::{
    avatar_schema, compressed_protocol, protocol, AVATAR_TEMPLATE, BOX_TEMPLATE,
};

/// Routes `log` output through `env_logger`; safe to call from every test
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

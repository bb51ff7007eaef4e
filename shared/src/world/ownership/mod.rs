pub mod error;
pub mod ownership_arbiter;
pub mod ownership_state;

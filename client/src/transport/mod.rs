pub use inner::{SendError, Transport};

mod inner {

    use std::fmt;

    use netshare_shared::{ConnectionStatus, DataType};

    /// Returned when the transport could not hand a payload to the network.
    /// The engine never retries; the next sync cycle carries fresh state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SendError;

    impl fmt::Display for SendError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "transport could not send payload")
        }
    }

    impl std::error::Error for SendError {}

    /// Broadcast channel to every other peer in the session
    pub trait Transport: ConnectionStatus {
        /// Reliable, ordered delivery. Used for full syncs and ownership
        /// announcements.
        fn broadcast_guaranteed(
            &mut self,
            data_type: DataType,
            payload: &[u8],
        ) -> Result<(), SendError>;

        /// Unreliable delivery. Used for dirty syncs and remove notices.
        fn broadcast_best_effort(
            &mut self,
            data_type: DataType,
            payload: &[u8],
        ) -> Result<(), SendError>;
    }
}

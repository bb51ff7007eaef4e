use std::time::Duration;

use log::warn;
use serde::Deserialize;

use super::error::ProtocolError;

const DEFAULT_UPDATE_RATE: f32 = 15.0;

/// Process-wide sync settings, fixed once the `Protocol` is locked
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncConfig {
    /// How many times per second an owner may emit sync traffic for one entity
    pub update_rate: f32,
    /// Whether non-owned, non-physics entities interpolate between received poses
    pub use_interpolation: bool,
    /// Whether dirty syncs are sent in the position-indexed compressed form
    pub compress_sync_packets: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            update_rate: DEFAULT_UPDATE_RATE,
            use_interpolation: true,
            compress_sync_packets: false,
        }
    }
}

impl SyncConfig {
    /// Interval between syncs at `update_rate` syncs per second. Fails for
    /// rates that are not positive or whose interval overflows a `Duration`.
    pub fn interval_for(update_rate: f32) -> Result<Duration, ProtocolError> {
        if !update_rate.is_finite() || update_rate <= 0.0 {
            return Err(ProtocolError::InvalidUpdateRate { update_rate });
        }
        Duration::try_from_secs_f64(1.0 / f64::from(update_rate))
            .map_err(|_| ProtocolError::InvalidUpdateRate { update_rate })
    }

    pub fn try_sync_interval(&self) -> Result<Duration, ProtocolError> {
        Self::interval_for(self.update_rate)
    }

    /// Minimum spacing between two syncs of the same entity. An unusable
    /// rate falls back to the default one.
    pub fn sync_interval(&self) -> Duration {
        match self.try_sync_interval() {
            Ok(interval) => interval,
            Err(err) => {
                warn!("SyncConfig: {}, syncing at {} Hz instead", err, DEFAULT_UPDATE_RATE);
                Duration::from_secs_f64(1.0 / f64::from(DEFAULT_UPDATE_RATE))
            }
        }
    }
}

use std::time::{Duration, Instant};

use crate::protocol::SyncConfig;

/// The two sync verbs an owner can perform
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyncKind {
    /// Every tracked component, sent on the guaranteed tier
    All,
    /// Only components that changed since they were last sent
    Dirty,
}

/// Rate limiter for one entity's outgoing sync traffic
#[derive(Clone, Debug)]
pub struct SyncScheduler {
    interval: Duration,
    next_sync_time: Option<Instant>,
}

impl SyncScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_sync_time: None,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.sync_interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_sync_time(&self) -> Option<Instant> {
        self.next_sync_time
    }

    /// False until the first sync has been performed
    pub fn needs_to_sync(&self, now: &Instant) -> bool {
        match self.next_sync_time {
            Some(next_sync_time) => *now >= next_sync_time,
            None => false,
        }
    }

    /// Called by both sync verbs, whether or not anything was sent
    pub fn update_next_sync_time(&mut self, now: &Instant) {
        self.next_sync_time = Some(*now + self.interval);
    }

    pub fn reset(&mut self) {
        self.next_sync_time = None;
    }
}

pub mod dirty_differ;
pub mod component_snapshot;
pub mod snapshot_cache;

pub mod entity_options;
pub mod entity_record;
pub mod pending_spawns;
pub mod readiness_waitlist;
pub mod subscriptions;

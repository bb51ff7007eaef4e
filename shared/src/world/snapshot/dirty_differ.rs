use crate::world::schema::{component_schema::ComponentSchema, descriptor::ComponentDescriptor};

use super::{component_snapshot::Snapshot, snapshot_cache::SnapshotCache};

/// Schema entries whose fresh value differs from the cached one, in schema
/// order. Never-sent entries are always dirty; entries missing from the fresh
/// snapshot never are.
pub fn diff(
    schema: &ComponentSchema,
    fresh: &Snapshot,
    cache: &SnapshotCache,
) -> Vec<ComponentDescriptor> {
    let mut dirty = Vec::new();

    for descriptor in schema {
        let key = descriptor.key();
        let Some(fresh_value) = fresh.get(&key) else {
            continue;
        };
        match cache.get(&key) {
            None => dirty.push(descriptor.clone()),
            Some(cached_value) => {
                if cached_value != fresh_value {
                    dirty.push(descriptor.clone());
                }
            }
        }
    }

    dirty
}

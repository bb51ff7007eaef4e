use super::component::syncable::SyncableComponent;

/// Structures that implement the WorldRefType trait will be able to be
/// snapshotted by the sync engine
pub trait WorldRefType<E> {
    fn has_entity(&self, entity: &E) -> bool;

    /// Component called `name` attached directly to `entity`
    fn component(&self, entity: &E, name: &str) -> Option<&dyn SyncableComponent>;

    /// First element in the subtree under `entity` matching `selector`
    fn select(&self, entity: &E, selector: &str) -> Option<E>;

    /// Element directly above `entity` in the scene hierarchy
    fn parent(&self, entity: &E) -> Option<E>;
}

/// Structures that implement the WorldMutType trait will be able to receive
/// remote component values from the sync engine
pub trait WorldMutType<E>: WorldRefType<E> {
    fn component_mut(&mut self, entity: &E, name: &str) -> Option<&mut dyn SyncableComponent>;

    fn insert_component(&mut self, entity: &E, name: &str, component: Box<dyn SyncableComponent>);

    /// Toggles pose interpolation for an entity driven by remote updates
    fn set_interpolated(&mut self, _entity: &E, _enabled: bool) {}
}

/// Scene-graph world for end-to-end testing: entities with named
/// components, selector-addressed children and a parent link

use std::collections::{HashMap, VecDeque};

use serde_json::Value;

use netshare_shared::{
    Position, Rotation, SyncableComponent, Vec3, WorldMutType, WorldRefType,
};

// TestEntity - Simple u64-based entity
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct TestEntity(u64);

impl TestEntity {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Default)]
struct Node {
    components: HashMap<String, Box<dyn SyncableComponent>>,
    children: Vec<(String, TestEntity)>,
    parent: Option<TestEntity>,
    interpolated: bool,
}

// TestWorld - Simple HashMap-based world
#[derive(Default)]
pub struct TestWorld {
    nodes: HashMap<TestEntity, Node>,
    next_id: u64,
}

impl TestWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> TestEntity {
        self.next_id += 1;
        let entity = TestEntity::new(self.next_id);
        self.nodes.insert(entity, Node::default());
        entity
    }

    /// Spawns an entity with a position and a rotation at the origin
    pub fn spawn_transform(&mut self) -> TestEntity {
        let entity = self.spawn();
        self.insert(&entity, Position::NAME, Position::default());
        self.insert(&entity, Rotation::NAME, Rotation::default());
        entity
    }

    /// Spawns a child reachable from `parent` through `selector`
    pub fn spawn_child(&mut self, parent: &TestEntity, selector: &str) -> TestEntity {
        let child = self.spawn();
        self.attach(parent, selector, &child);
        child
    }

    pub fn attach(&mut self, parent: &TestEntity, selector: &str, child: &TestEntity) {
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push((selector.to_string(), *child));
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(*parent);
        }
    }

    pub fn despawn(&mut self, entity: &TestEntity) {
        let Some(node) = self.nodes.remove(entity) else {
            return;
        };
        if let Some(parent) = node.parent.and_then(|parent| self.nodes.get_mut(&parent)) {
            parent.children.retain(|(_, child)| child != entity);
        }
        for (_, child) in node.children {
            self.despawn(&child);
        }
    }

    pub fn insert<C: SyncableComponent + 'static>(
        &mut self,
        entity: &TestEntity,
        name: &str,
        component: C,
    ) {
        self.insert_component(entity, name, Box::new(component));
    }

    pub fn remove(&mut self, entity: &TestEntity, name: &str) {
        if let Some(node) = self.nodes.get_mut(entity) {
            node.components.remove(name);
        }
    }

    pub fn data(&self, entity: &TestEntity, name: &str) -> Option<Value> {
        self.component(entity, name).map(|component| component.get_data())
    }

    pub fn set_data(&mut self, entity: &TestEntity, name: &str, data: Value) {
        let component = self
            .component_mut(entity, name)
            .expect("entity should carry the component");
        component
            .set_data(data)
            .expect("component should accept the data");
    }

    pub fn position(&self, entity: &TestEntity) -> Option<Vec3> {
        self.data(entity, Position::NAME)
            .and_then(|data| serde_json::from_value(data).ok())
    }

    pub fn set_position(&mut self, entity: &TestEntity, x: f64, y: f64, z: f64) {
        self.insert(entity, Position::NAME, Position::new(x, y, z));
    }

    pub fn is_interpolated(&self, entity: &TestEntity) -> bool {
        self.nodes
            .get(entity)
            .map(|node| node.interpolated)
            .unwrap_or(false)
    }

    pub fn entity_count(&self) -> usize {
        self.nodes.len()
    }
}

impl WorldRefType<TestEntity> for TestWorld {
    fn has_entity(&self, entity: &TestEntity) -> bool {
        self.nodes.contains_key(entity)
    }

    fn component(&self, entity: &TestEntity, name: &str) -> Option<&dyn SyncableComponent> {
        let component = self.nodes.get(entity)?.components.get(name)?;
        Some(&**component)
    }

    fn select(&self, entity: &TestEntity, selector: &str) -> Option<TestEntity> {
        let mut queue = VecDeque::from([*entity]);
        while let Some(current) = queue.pop_front() {
            let node = self.nodes.get(&current)?;
            for (child_selector, child) in &node.children {
                if child_selector == selector {
                    return Some(*child);
                }
                queue.push_back(*child);
            }
        }
        None
    }

    fn parent(&self, entity: &TestEntity) -> Option<TestEntity> {
        self.nodes.get(entity)?.parent
    }
}

impl WorldMutType<TestEntity> for TestWorld {
    fn component_mut(
        &mut self,
        entity: &TestEntity,
        name: &str,
    ) -> Option<&mut dyn SyncableComponent> {
        match self.nodes.get_mut(entity)?.components.get_mut(name) {
            Some(component) => Some(&mut **component),
            None => None,
        }
    }

    fn insert_component(
        &mut self,
        entity: &TestEntity,
        name: &str,
        component: Box<dyn SyncableComponent>,
    ) {
        if let Some(node) = self.nodes.get_mut(entity) {
            node.components.insert(name.to_string(), component);
        }
    }

    fn set_interpolated(&mut self, entity: &TestEntity, enabled: bool) {
        if let Some(node) = self.nodes.get_mut(entity) {
            node.interpolated = enabled;
        }
    }
}

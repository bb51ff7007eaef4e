use std::fmt;

/// Separates selector, component and property inside a child-schema key
pub const CHILD_KEY_SEPARATOR: &str = "|||";

/// Addresses a component (or a single field of it) on a nested element
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChildSchema {
    pub selector: String,
    pub component: String,
    pub property: Option<String>,
}

impl ChildSchema {
    pub fn new(selector: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            component: component.into(),
            property: None,
        }
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn to_key(&self) -> ComponentKey {
        let mut key = format!("{}{}{}", self.selector, CHILD_KEY_SEPARATOR, self.component);
        if let Some(property) = &self.property {
            key.push_str(CHILD_KEY_SEPARATOR);
            key.push_str(property);
        }
        ComponentKey(key)
    }
}

/// One entry of a component schema
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ComponentDescriptor {
    /// A component on the entity itself
    Root(String),
    /// A component on an element nested under the entity
    Child(ChildSchema),
}

impl ComponentDescriptor {
    pub fn root(name: impl Into<String>) -> Self {
        Self::Root(name.into())
    }

    pub fn child(selector: impl Into<String>, component: impl Into<String>) -> Self {
        Self::Child(ChildSchema::new(selector, component))
    }

    pub fn child_property(
        selector: impl Into<String>,
        component: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        Self::Child(ChildSchema::new(selector, component).with_property(property))
    }

    pub fn key(&self) -> ComponentKey {
        match self {
            Self::Root(name) => ComponentKey(name.clone()),
            Self::Child(child) => child.to_key(),
        }
    }
}

impl From<&str> for ComponentDescriptor {
    fn from(name: &str) -> Self {
        Self::Root(name.to_string())
    }
}

impl From<ChildSchema> for ComponentDescriptor {
    fn from(child: ChildSchema) -> Self {
        Self::Child(child)
    }
}

/// The string a descriptor is known by inside snapshots and full packets
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKey(String);

impl ComponentKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_child_key(&self) -> bool {
        self.0.contains(CHILD_KEY_SEPARATOR)
    }

    /// Parses a child key back into its schema, `None` for root keys and
    /// keys with the wrong number of segments
    pub fn to_child_schema(&self) -> Option<ChildSchema> {
        if !self.is_child_key() {
            return None;
        }
        let parts: Vec<&str> = self.0.split(CHILD_KEY_SEPARATOR).collect();
        match parts.as_slice() {
            [selector, component] => Some(ChildSchema::new(*selector, *component)),
            [selector, component, property] => {
                Some(ChildSchema::new(*selector, *component).with_property(*property))
            }
            _ => None,
        }
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

use netshare_shared::{ChildSchema, ComponentSchema, Protocol};

/// Plain transform-only template
pub const BOX_TEMPLATE: &str = "#box";
/// Template with child-scoped components on its `.head` and `.hand` children
pub const AVATAR_TEMPLATE: &str = "#avatar";

pub fn avatar_schema() -> ComponentSchema {
    ComponentSchema::transform()
        .with_child(ChildSchema::new(".head", "rotation"))
        .with_child(ChildSchema::new(".head", "visible"))
        .with_child(ChildSchema::new(".hand", "position").with_property("y"))
}

/// Protocol shared by every test peer
pub fn protocol() -> Protocol {
    Protocol::builder()
        .add_schema(AVATAR_TEMPLATE, avatar_schema())
        .build()
}

/// Same as [`protocol`], with dirty syncs sent in compressed form
pub fn compressed_protocol() -> Protocol {
    Protocol::builder()
        .add_schema(AVATAR_TEMPLATE, avatar_schema())
        .compress_sync_packets(true)
        .build()
}

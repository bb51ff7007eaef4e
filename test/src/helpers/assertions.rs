/// Assert the owner a peer has recorded for an entity
#[macro_export]
macro_rules! assert_owner {
    ($peer:expr, $network_id:expr, $owner:expr) => {
        assert_eq!(
            $peer.owner($network_id).as_deref(),
            Some($owner),
            "Unexpected owner recorded for entity {}",
            $network_id
        );
    };
}

/// Assert the root position of an entity in a peer's world
#[macro_export]
macro_rules! assert_position {
    ($peer:expr, $entity:expr, $x:expr, $y:expr, $z:expr) => {
        assert_eq!(
            $peer.world.position(&$entity),
            Some(netshare_shared::Vec3::new($x, $y, $z)),
            "Unexpected position for entity {:?}",
            $entity
        );
    };
}

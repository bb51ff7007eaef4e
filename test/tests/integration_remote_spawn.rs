/// Integration tests for the receiving side: spawn requests for unknown
/// entities, template-child readiness, removals and malformed payloads

use std::time::{Duration, Instant};

use serde_json::json;

use netshare_client::{EngineEvent, EntityOptions};
use netshare_shared::{DataType, PacketError, Rotation, SyncKind, WorldRefType};
use netshare_test::{
    assert_owner, assert_position, exchange_packets, init_logging, protocol, TestPeer, AVATAR_TEMPLATE,
    BOX_TEMPLATE,
};

fn after(now: &Instant, millis: u64) -> Instant {
    *now + Duration::from_millis(millis)
}

#[test]
fn unknown_entity_is_requested_once() {
    init_logging();
    let now = Instant::now();
    let mut alice = TestPeer::new(protocol());
    let mut bob = TestPeer::new(protocol());
    alice.login("alice", &now);
    bob.login("bob", &now);

    let (entity, network_id) = alice.spawn_local(EntityOptions::networked(BOX_TEMPLATE), &now);
    alice.world.set_position(&entity, 2.0, 0.0, 0.0);
    alice
        .engine
        .trigger_sync(&network_id, SyncKind::All, &now, &alice.world);

    let outbox = alice.take_outbox();
    assert_eq!(outbox.len(), 2);
    bob.deliver(&outbox, &now);

    assert_eq!(bob.engine.events().len(), 1);
    let event = bob.engine.events().iter().next().unwrap();
    assert_eq!(
        event,
        &EngineEvent::SpawnRequested {
            network_id: network_id.clone(),
            template: BOX_TEMPLATE.to_string(),
            owner: "alice".to_string(),
            parent: None,
            show_template: true,
        }
    );
    assert!(bob.engine.has_pending_spawn(&network_id));
    assert!(!bob.engine.has_entity(&network_id));

    // the host answers with the latest state, not the first packet's
    bob.process_events(&now);
    let replica = bob.entity(&network_id).unwrap();
    assert_position!(bob, replica, 2.0, 0.0, 0.0);
    assert!(!bob.engine.has_pending_spawn(&network_id));
}

#[test]
fn child_components_wait_for_template_children() {
    let now = Instant::now();
    let mut alice = TestPeer::new(protocol());
    let mut bob = TestPeer::new(protocol()).defers_children();
    alice.login("alice", &now);
    bob.login("bob", &now);

    let (avatar, network_id) = alice.spawn_local(EntityOptions::networked(AVATAR_TEMPLATE), &now);
    let head = alice.world.select(&avatar, ".head").unwrap();
    alice
        .world
        .set_data(&head, Rotation::NAME, json!({"x": 0.0, "y": 90.0, "z": 0.0}));
    alice.world.set_position(&avatar, 1.0, 2.0, 3.0);
    alice
        .engine
        .trigger_sync(&network_id, SyncKind::All, &now, &alice.world);
    exchange_packets(&mut [&mut alice, &mut bob], &now);

    let replica = bob.entity(&network_id).unwrap();
    assert_position!(bob, replica, 1.0, 2.0, 3.0);
    assert!(bob.world.select(&replica, ".head").is_none());
    assert!(bob.engine.is_waiting_for_children(&network_id));

    // root updates keep flowing while the children load
    alice.world.set_position(&avatar, 5.0, 5.0, 5.0);
    alice.tick(&after(&now, 100));
    exchange_packets(&mut [&mut alice, &mut bob], &now);
    assert_position!(bob, replica, 5.0, 5.0, 5.0);

    assert!(bob.finish_children(&network_id));

    let replica_head = bob.world.select(&replica, ".head").unwrap();
    assert_eq!(
        bob.world.data(&replica_head, Rotation::NAME),
        Some(json!({"x": 0.0, "y": 90.0, "z": 0.0}))
    );
    assert_position!(bob, replica, 5.0, 5.0, 5.0);
    assert!(!bob.engine.is_waiting_for_children(&network_id));
}

#[test]
fn held_update_expires() {
    let now = Instant::now();
    let mut alice = TestPeer::new(protocol());
    let mut bob = TestPeer::new(protocol()).defers_children();
    alice.login("alice", &now);
    bob.login("bob", &now);

    let (_, network_id) = alice.spawn_local(EntityOptions::networked(AVATAR_TEMPLATE), &now);
    exchange_packets(&mut [&mut alice, &mut bob], &now);
    assert!(bob.engine.is_waiting_for_children(&network_id));

    bob.tick(&after(&now, 61_000));

    assert!(!bob.engine.is_waiting_for_children(&network_id));
    assert!(!bob.finish_children(&network_id));
    assert!(bob.engine.has_entity(&network_id));
}

#[test]
fn children_ready_after_local_release_keep_owner_and_root() {
    let now = Instant::now();
    let mut alice = TestPeer::new(protocol()).shares_template(AVATAR_TEMPLATE);
    let mut bob = TestPeer::new(protocol())
        .shares_template(AVATAR_TEMPLATE)
        .defers_children();
    alice.login("alice", &now);
    bob.login("bob", &now);

    let (avatar, network_id) = alice.spawn_local(
        EntityOptions::shared(AVATAR_TEMPLATE).with_owner("alice"),
        &now,
    );
    let head = alice.world.select(&avatar, ".head").unwrap();
    alice
        .world
        .set_data(&head, Rotation::NAME, json!({"x": 0.0, "y": 90.0, "z": 0.0}));
    alice
        .engine
        .trigger_sync(&network_id, SyncKind::All, &now, &alice.world);
    exchange_packets(&mut [&mut alice, &mut bob], &now);
    assert!(bob.engine.is_waiting_for_children(&network_id));
    assert_owner!(bob, &network_id, "alice");

    // bob moves it and lets go while its children are still loading
    bob.take_ownership(&network_id, &now).unwrap();
    let replica = bob.entity(&network_id).unwrap();
    bob.world.set_position(&replica, 9.0, 9.0, 9.0);
    bob.remove_ownership(&network_id, &now).unwrap();
    exchange_packets(&mut [&mut alice, &mut bob], &now);
    assert_owner!(alice, &network_id, "");
    assert_owner!(bob, &network_id, "");

    assert!(bob.finish_children(&network_id));

    assert_owner!(bob, &network_id, "");
    assert!(!bob.engine.is_mine(&network_id));
    assert_position!(bob, replica, 9.0, 9.0, 9.0);
    assert_position!(alice, avatar, 9.0, 9.0, 9.0);
    let replica_head = bob.world.select(&replica, ".head").unwrap();
    assert_eq!(
        bob.world.data(&replica_head, Rotation::NAME),
        Some(json!({"x": 0.0, "y": 90.0, "z": 0.0}))
    );
}

#[test]
fn unanswered_spawn_request_expires() {
    let now = Instant::now();
    let mut alice = TestPeer::new(protocol());
    let mut bob = TestPeer::new(protocol());
    alice.login("alice", &now);
    bob.login("bob", &now);

    let (_, network_id) = alice.spawn_local(EntityOptions::networked(BOX_TEMPLATE), &now);
    let outbox = alice.take_outbox();
    bob.deliver(&outbox, &now);
    assert!(bob.engine.has_pending_spawn(&network_id));

    // the host drops the request
    assert_eq!(bob.engine.drain_events().count(), 1);

    let later = after(&now, 61_000);
    bob.tick(&later);
    assert!(!bob.engine.has_pending_spawn(&network_id));

    bob.deliver(&outbox, &later);
    assert!(bob.engine.has_pending_spawn(&network_id));
    assert!(matches!(
        bob.engine.events().iter().next(),
        Some(EngineEvent::SpawnRequested { network_id: id, .. }) if id == &network_id
    ));
}

#[test]
fn removal_despawns_replicas() {
    let now = Instant::now();
    let mut alice = TestPeer::new(protocol());
    let mut bob = TestPeer::new(protocol());
    alice.login("alice", &now);
    bob.login("bob", &now);

    let (_, network_id) = alice.spawn_local(EntityOptions::networked(BOX_TEMPLATE), &now);
    exchange_packets(&mut [&mut alice, &mut bob], &now);
    assert_eq!(bob.world.entity_count(), 1);

    alice.despawn_local(&network_id, &now).unwrap();
    let outbox = alice.engine.transport().outbox().to_vec();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].data_type, DataType::EntityRemoved);
    assert!(!outbox[0].guaranteed);
    assert_eq!(outbox[0].json(), json!({"networkId": network_id.as_str()}));
    exchange_packets(&mut [&mut alice, &mut bob], &now);

    assert!(!bob.engine.has_entity(&network_id));
    assert_eq!(bob.world.entity_count(), 0);
    assert!(bob.events().iter().any(|event| matches!(
        event,
        EngineEvent::DespawnRequested { network_id: id, .. } if id == &network_id
    )));
}

#[test]
fn removing_owned_shared_entity_releases_it_first() {
    let now = Instant::now();
    let mut alice = TestPeer::new(protocol());
    alice.login("alice", &now);
    let (_, network_id) = alice.spawn_local(EntityOptions::shared(BOX_TEMPLATE), &now);
    alice.take_ownership(&network_id, &now).unwrap();
    alice.take_outbox();

    alice.despawn_local(&network_id, &now).unwrap();

    let outbox = alice.take_outbox();
    assert_eq!(outbox.len(), 2);
    assert_eq!(outbox[0].data_type, DataType::EntityUpdate);
    assert_eq!(outbox[0].json()["owner"], json!(""));
    assert_eq!(outbox[1].data_type, DataType::EntityRemoved);
    assert!(!alice.engine.has_entity(&network_id));
}

#[test]
fn removing_replica_stays_local() {
    let now = Instant::now();
    let mut alice = TestPeer::new(protocol());
    let mut bob = TestPeer::new(protocol());
    alice.login("alice", &now);
    bob.login("bob", &now);

    let (_, network_id) = alice.spawn_local(EntityOptions::networked(BOX_TEMPLATE), &now);
    exchange_packets(&mut [&mut alice, &mut bob], &now);

    assert!(bob.despawn_local(&network_id, &now).is_some());
    assert!(bob.take_outbox().is_empty());
    assert!(alice.engine.has_entity(&network_id));
}

#[test]
fn removal_before_spawn_drops_pending_state() {
    let now = Instant::now();
    let mut alice = TestPeer::new(protocol());
    let mut bob = TestPeer::new(protocol());
    alice.login("alice", &now);
    bob.login("bob", &now);

    let (_, network_id) = alice.spawn_local(EntityOptions::networked(BOX_TEMPLATE), &now);
    bob.deliver(&alice.take_outbox(), &now);
    assert!(bob.engine.has_pending_spawn(&network_id));

    alice.despawn_local(&network_id, &now);
    bob.deliver(&alice.take_outbox(), &now);

    assert!(!bob.engine.has_pending_spawn(&network_id));
    assert!(!bob.engine.has_entity(&network_id));
}

#[test]
fn malformed_payloads_are_dropped() {
    let now = Instant::now();
    let mut bob = TestPeer::new(protocol());
    bob.login("bob", &now);

    let result = bob
        .engine
        .try_receive(DataType::EntityUpdate, b"{not json", &now, &mut bob.world);
    assert!(matches!(result, Err(PacketError::MalformedJson { .. })));

    bob.engine
        .receive(DataType::EntityUpdate, b"[7, \"abc\"]", &now, &mut bob.world);
    bob.engine
        .receive(DataType::EntityRemoved, b"{\"id\": 1}", &now, &mut bob.world);

    assert!(bob.engine.events().is_empty());
    assert_eq!(bob.engine.entity_count(), 0);
}

#[test]
fn unknown_components_are_ignored() {
    let now = Instant::now();
    let mut bob = TestPeer::new(protocol());
    bob.login("bob", &now);

    let payload = json!({
        "0": 0,
        "networkId": "carol01",
        "owner": "carol",
        "template": BOX_TEMPLATE,
        "components": {
            "position": {"x": 1.0, "y": 0.0, "z": 0.0},
            "color": "red"
        }
    });
    bob.engine.receive(
        DataType::EntityUpdate,
        &serde_json::to_vec(&payload).unwrap(),
        &now,
        &mut bob.world,
    );
    bob.process_events(&now);

    let replica = bob.entity(&"carol01".into()).unwrap();
    assert_position!(bob, replica, 1.0, 0.0, 0.0);
    assert_eq!(bob.world.data(&replica, "color"), None);
    assert_eq!(bob.owner(&"carol01".into()).as_deref(), Some("carol"));
}

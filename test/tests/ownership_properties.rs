/// Property tests: however sequential takeovers and releases interleave,
/// every peer agrees on one owner and at most one peer believes it owns

use std::time::Instant;

use proptest::prelude::*;

use netshare_client::EntityOptions;
use netshare_shared::NetworkId;
use netshare_test::{exchange_packets, protocol, TestPeer, BOX_TEMPLATE};

const PEER_NAMES: [&str; 3] = ["alice", "bob", "carol"];

#[derive(Clone, Debug)]
enum Action {
    Take(usize),
    Remove(usize),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0..PEER_NAMES.len()).prop_map(Action::Take),
        (0..PEER_NAMES.len()).prop_map(Action::Remove),
    ]
}

fn exchange_all(peers: &mut [TestPeer], now: &Instant) {
    let mut refs: Vec<&mut TestPeer> = peers.iter_mut().collect();
    exchange_packets(&mut refs, now);
}

fn session(now: &Instant) -> (Vec<TestPeer>, NetworkId) {
    let mut peers: Vec<TestPeer> = PEER_NAMES
        .iter()
        .map(|name| {
            let mut peer = TestPeer::new(protocol()).shares_template(BOX_TEMPLATE);
            peer.login(name, now);
            peer
        })
        .collect();

    let (_, network_id) = peers[0].spawn_local(EntityOptions::shared(BOX_TEMPLATE), now);
    exchange_all(&mut peers, now);
    (peers, network_id)
}

proptest! {
    #[test]
    fn peers_converge_on_single_owner(actions in prop::collection::vec(action(), 1..24)) {
        let now = Instant::now();
        let (mut peers, network_id) = session(&now);

        for action in actions {
            match action {
                Action::Take(index) => {
                    let _ = peers[index].take_ownership(&network_id, &now);
                }
                Action::Remove(index) => {
                    let _ = peers[index].remove_ownership(&network_id, &now);
                }
            }
            exchange_all(&mut peers, &now);

            let owners: Vec<Option<String>> =
                peers.iter().map(|peer| peer.owner(&network_id)).collect();
            prop_assert!(owners.iter().all(|owner| owner == &owners[0]), "{:?}", owners);

            let claimants: Vec<&str> = peers
                .iter()
                .zip(PEER_NAMES)
                .filter(|(peer, _)| peer.engine.is_mine(&network_id))
                .map(|(_, name)| name)
                .collect();
            prop_assert!(claimants.len() <= 1, "{:?}", claimants);

            let owner = owners[0].clone().unwrap_or_default();
            match claimants.first() {
                Some(claimant) => prop_assert_eq!(owner.as_str(), *claimant),
                None => prop_assert_eq!(owner.as_str(), ""),
            }
        }
    }
}

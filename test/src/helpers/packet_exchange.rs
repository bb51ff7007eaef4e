use std::time::Instant;

use log::debug;

use super::TestPeer;

const MAX_ROUNDS: usize = 8;

/// Delivers every peer's outbox to all other peers, then lets each peer
/// answer the events that caused. Repeats until nothing is left to send.
pub fn exchange_packets(peers: &mut [&mut TestPeer], now: &Instant) {
    for round in 0..MAX_ROUNDS {
        let outboxes: Vec<_> = peers.iter_mut().map(|peer| peer.take_outbox()).collect();
        let sent: usize = outboxes.iter().map(Vec::len).sum();
        if sent == 0 {
            return;
        }
        debug!("exchange_packets: round {} carries {} packets", round, sent);

        for (sender, outbox) in outboxes.iter().enumerate() {
            for (receiver, peer) in peers.iter_mut().enumerate() {
                if receiver != sender {
                    peer.deliver(outbox, now);
                }
            }
        }

        for peer in peers.iter_mut() {
            peer.process_events(now);
        }
    }
}

/// Ticks every peer once, then exchanges packets
pub fn tick_and_exchange(peers: &mut [&mut TestPeer], now: &Instant) {
    for peer in peers.iter_mut() {
        peer.tick(now);
    }
    exchange_packets(peers, now);
}

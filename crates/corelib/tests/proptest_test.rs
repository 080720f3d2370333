//! Property tests over arbitrary weighted server lists.

use proptest::prelude::*;

use corelib::node::{ServerAddr, WeightedServer};
use corelib::ring::vnode_counts;
use corelib::topology::Topology;
use corelib::RingSelector;

/// Up to 12 distinct loopback servers with arbitrary weights.
fn server_list() -> impl Strategy<Value = Vec<WeightedServer>> {
    proptest::collection::btree_set(1u16..60_000, 1..12).prop_flat_map(|ports| {
        let n = ports.len();
        proptest::collection::vec(0u32..20, n).prop_map(move |weights| {
            ports
                .iter()
                .zip(weights)
                .map(|(port, w)| WeightedServer::new(format!("127.0.0.1:{}", port), w))
                .collect::<Vec<_>>()
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn picks_are_members(servers in server_list(), keys in proptest::collection::vec(".*", 1..50)) {
        let selector = RingSelector::new();
        selector.set_servers(&servers).unwrap();
        let members: Vec<ServerAddr> = servers
            .iter()
            .map(|s| ServerAddr::Tcp(s.addr.parse().unwrap()))
            .collect();
        for key in &keys {
            let picked = selector.pick_server(key).unwrap();
            prop_assert!(members.contains(&picked));
        }
    }

    #[test]
    fn rebuild_is_deterministic(servers in server_list(), key in ".*") {
        let selector = RingSelector::new();
        selector.set_servers(&servers).unwrap();
        let first = selector.pick_server(&key).unwrap();
        let tokens = selector.snapshot().tokens().to_vec();
        selector.set_servers(&servers).unwrap();
        prop_assert_eq!(selector.pick_server(&key).unwrap(), first);
        prop_assert_eq!(tokens, selector.snapshot().tokens().to_vec());
    }

    #[test]
    fn ring_is_sorted_and_within_budget(servers in server_list()) {
        let selector = RingSelector::new();
        selector.set_servers(&servers).unwrap();
        let ring = selector.snapshot();
        prop_assert!(ring.tokens().windows(2).all(|w| w[0] < w[1]));
        prop_assert!(ring.vnode_count() <= 50 * servers.len());
        prop_assert_eq!(Topology::of(&ring).vnode_count(), ring.vnode_count());
    }

    #[test]
    fn counts_never_exceed_nominal(weights in proptest::collection::vec(any::<u32>(), 1..32)) {
        let counts = vnode_counts(&weights);
        prop_assert_eq!(counts.len(), weights.len());
        let total: usize = counts.iter().sum();
        prop_assert!(total <= 50 * weights.len());
        prop_assert!(total > 50 * weights.len() - weights.len());
    }
}

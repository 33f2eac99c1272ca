//! Property tests for the health ledger's core laws.
//!
//! Key invariants:
//! 1. `0 <= current <= max` after any sequence of mutations
//! 2. Defeated implies current == 0, and the state never reverts
//! 3. The defeat transition fires at most once per character
//! 4. A replica that exchanges after every mutation matches the authority

use proptest::prelude::*;
use vital_client::Client;
use vital_server::{Server, ServerConfig};
use vital_shared::Vitality;
use vital_test::{connect_pair, exchange_packets, protocol};

#[derive(Clone, Copy, Debug)]
enum Op {
    Damage(f32),
    Heal(f32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0.0f32..500.0).prop_map(Op::Damage),
        (0.0f32..500.0).prop_map(Op::Heal),
    ]
}

proptest! {
    /// Health stays clamped and defeat fires at most once, regardless of
    /// the mutation sequence
    #[test]
    fn prop_health_always_clamped(
        max in 1.0f32..1000.0,
        ops in prop::collection::vec(op_strategy(), 1..50),
    ) {
        let mut server = Server::new(ServerConfig::default(), protocol());
        let character = server.spawn_character(max).unwrap();
        let mut defeats = 0;

        for op in ops {
            let outcome = match op {
                Op::Damage(amount) => server.apply_damage(&character, amount).unwrap(),
                Op::Heal(amount) => server.heal(&character, amount).unwrap(),
            };
            if outcome.defeated {
                defeats += 1;
            }

            let health = server.health(&character).unwrap();
            prop_assert!(health >= 0.0);
            prop_assert!(health <= max);
            if server.vitality(&character) == Some(Vitality::Defeated) {
                prop_assert_eq!(health, 0.0);
            }
        }
        prop_assert!(defeats <= 1);
    }

    /// Once defeated, no mutation brings the character back
    #[test]
    fn prop_defeat_is_terminal(
        max in 1.0f32..1000.0,
        ops in prop::collection::vec(op_strategy(), 0..30),
    ) {
        let mut server = Server::new(ServerConfig::default(), protocol());
        let character = server.spawn_character(max).unwrap();
        server.apply_damage(&character, max).unwrap();
        prop_assert_eq!(server.vitality(&character), Some(Vitality::Defeated));

        for op in ops {
            match op {
                Op::Damage(amount) => server.apply_damage(&character, amount).unwrap(),
                Op::Heal(amount) => server.heal(&character, amount).unwrap(),
            };
            prop_assert_eq!(server.health(&character), Some(0.0));
            prop_assert_eq!(server.vitality(&character), Some(Vitality::Defeated));
        }
    }

    /// A replica that exchanges after every relayed request converges on the
    /// authority's exact value
    #[test]
    fn prop_replica_matches_authority(
        max in 1.0f32..1000.0,
        ops in prop::collection::vec(op_strategy(), 1..20),
    ) {
        let mut server = Server::new(ServerConfig::default(), protocol());
        let mut client = Client::new(protocol());
        connect_pair(&mut server, &mut client);
        let character = server.spawn_character(max).unwrap();
        exchange_packets(&mut server, &mut [&mut client]);

        for op in ops {
            match op {
                Op::Damage(amount) => client.request_damage(&character, amount).unwrap(),
                Op::Heal(amount) => client.request_heal(&character, amount).unwrap(),
            }
            exchange_packets(&mut server, &mut [&mut client]);
            prop_assert_eq!(client.health(&character), server.health(&character));
            prop_assert_eq!(client.vitality(&character), server.vitality(&character));
        }
    }
}

//! A client that connects after the ledger has history receives the full
//! current state, not the spawn-time values.

use std::collections::HashSet;

use vital_client::{Client, DespawnCharacterEvent, SpawnCharacterEvent};
use vital_server::{Server, ServerConfig};
use vital_shared::Vitality;
use vital_test::{connect_pair, exchange_packets, flush_server_to_clients, protocol};

#[test]
fn late_joiner_sees_current_ledger_state() {
    let mut server = Server::new(ServerConfig::default(), protocol());
    let mut client_a = Client::new(protocol());
    connect_pair(&mut server, &mut client_a);

    let tank = server.spawn_character(200.0).expect("spawn failed");
    let scout = server.spawn_character(80.0).expect("spawn failed");
    server.apply_damage(&tank, 140.0).expect("damage failed");
    exchange_packets(&mut server, &mut [&mut client_a]);

    // second client joins after the damage already happened
    let mut client_b = Client::new(protocol());
    connect_pair(&mut server, &mut client_b);
    let mut client_events = flush_server_to_clients(&mut server, &mut [&mut client_b]);

    let spawns: HashSet<_> = client_events[0].read::<SpawnCharacterEvent>().collect();
    assert_eq!(spawns, HashSet::from([tank, scout]));
    assert_eq!(client_b.health(&tank), Some(60.0));
    assert_eq!(client_b.max_health(&tank), Some(200.0));
    assert_eq!(client_b.health(&scout), Some(80.0));
}

#[test]
fn late_joiner_sees_defeated_character_as_defeated() {
    let mut server = Server::new(ServerConfig::default(), protocol());
    let fallen = server.spawn_character(50.0).expect("spawn failed");
    server.apply_damage(&fallen, 50.0).expect("damage failed");

    let mut client = Client::new(protocol());
    connect_pair(&mut server, &mut client);
    flush_server_to_clients(&mut server, &mut [&mut client]);

    assert_eq!(client.health(&fallen), Some(0.0));
    assert_eq!(client.vitality(&fallen), Some(Vitality::Defeated));
}

#[test]
fn despawn_removes_replica_everywhere() {
    let mut server = Server::new(ServerConfig::default(), protocol());
    let mut client = Client::new(protocol());
    connect_pair(&mut server, &mut client);

    let character = server.spawn_character(100.0).expect("spawn failed");
    exchange_packets(&mut server, &mut [&mut client]);
    assert!(client.has_character(&character));

    server.despawn_character(&character).expect("despawn failed");
    let mut client_events = flush_server_to_clients(&mut server, &mut [&mut client]);

    let despawns: Vec<_> = client_events[0].read::<DespawnCharacterEvent>().collect();
    assert_eq!(despawns, vec![character]);
    assert!(!client.has_character(&character));
    assert!(server.character_keys().is_empty());
}

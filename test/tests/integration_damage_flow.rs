//! End-to-end damage flow: a client relays a damage request, the server
//! executes it against the ledger, and the new health value replicates back
//! to every connected client.

use vital_client::{Client, SpawnCharacterEvent, UpdateHealthEvent};
use vital_server::{HealthChangeEvent, Server, ServerConfig};
use vital_test::{connect_pair, exchange_packets, protocol};

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

#[test]
fn client_damage_request_updates_replica() {
    init_logging();
    let mut server = Server::new(ServerConfig::default(), protocol());
    let mut client = Client::new(protocol());
    connect_pair(&mut server, &mut client);

    let character = server.spawn_character(100.0).expect("spawn failed");
    let (_, mut client_events) = exchange_packets(&mut server, &mut [&mut client]);

    let spawns: Vec<_> = client_events[0].read::<SpawnCharacterEvent>().collect();
    assert_eq!(spawns, vec![character]);
    assert_eq!(client.health(&character), Some(100.0));
    assert_eq!(client.max_health(&character), Some(100.0));

    client
        .request_damage(&character, 30.0)
        .expect("request failed");
    let (_, mut client_events) = exchange_packets(&mut server, &mut [&mut client]);

    assert_eq!(server.health(&character), Some(70.0));
    assert_eq!(client.health(&character), Some(70.0));

    let updates: Vec<_> = client_events[0].read::<UpdateHealthEvent>().collect();
    assert_eq!(updates, vec![(character, 70.0)]);

    // the authority's own change event lands on the next poll
    let mut server_events = server.receive();
    let changes: Vec<_> = server_events.read::<HealthChangeEvent>().collect();
    assert_eq!(changes, vec![(character, 70.0)]);
}

#[test]
fn damage_replicates_to_all_observers() {
    let mut server = Server::new(ServerConfig::default(), protocol());
    let mut client_a = Client::new(protocol());
    let mut client_b = Client::new(protocol());
    connect_pair(&mut server, &mut client_a);
    connect_pair(&mut server, &mut client_b);

    let character = server.spawn_character(100.0).expect("spawn failed");
    exchange_packets(&mut server, &mut [&mut client_a, &mut client_b]);

    client_a
        .request_damage(&character, 25.0)
        .expect("request failed");
    exchange_packets(&mut server, &mut [&mut client_a, &mut client_b]);

    // both observers converge on the authoritative value
    assert_eq!(client_a.health(&character), Some(75.0));
    assert_eq!(client_b.health(&character), Some(75.0));
}

#[test]
fn direct_authority_damage_replicates() {
    let mut server = Server::new(ServerConfig::default(), protocol());
    let mut client = Client::new(protocol());
    connect_pair(&mut server, &mut client);

    let character = server.spawn_character(100.0).expect("spawn failed");
    exchange_packets(&mut server, &mut [&mut client]);

    // server-side mutation, no client request involved
    let outcome = server
        .apply_damage(&character, 40.0)
        .expect("damage failed");
    assert_eq!(outcome.previous, 100.0);
    assert_eq!(outcome.current, 60.0);
    assert!(!outcome.defeated);

    exchange_packets(&mut server, &mut [&mut client]);
    assert_eq!(client.health(&character), Some(60.0));
}

//! Defeat transition: health reaching zero clamps, flips the character to
//! Defeated exactly once on both hosts, and stays that way.

use vital_client::{Client, DefeatEvent as ClientDefeatEvent, UpdateHealthEvent};
use vital_server::{DefeatEvent, Server, ServerConfig};
use vital_shared::Vitality;
use vital_test::{connect_pair, exchange_packets, protocol};

fn connected_pair_with_character(max: f32) -> (Server, Client, vital_shared::CharacterKey) {
    let mut server = Server::new(ServerConfig::default(), protocol());
    let mut client = Client::new(protocol());
    connect_pair(&mut server, &mut client);
    let character = server.spawn_character(max).expect("spawn failed");
    exchange_packets(&mut server, &mut [&mut client]);
    (server, client, character)
}

#[test]
fn lethal_damage_defeats_on_both_hosts() {
    let (mut server, mut client, character) = connected_pair_with_character(50.0);

    client
        .request_damage(&character, 50.0)
        .expect("request failed");
    let (_, mut client_events) = exchange_packets(&mut server, &mut [&mut client]);

    assert_eq!(server.health(&character), Some(0.0));
    assert_eq!(server.vitality(&character), Some(Vitality::Defeated));
    assert_eq!(client.health(&character), Some(0.0));
    assert_eq!(client.vitality(&character), Some(Vitality::Defeated));

    // the zeroing update precedes the notice, and the notice fires once
    let updates: Vec<_> = client_events[0].read::<UpdateHealthEvent>().collect();
    assert_eq!(updates, vec![(character, 0.0)]);
    let defeats: Vec<_> = client_events[0].read::<ClientDefeatEvent>().collect();
    assert_eq!(defeats, vec![character]);

    let mut server_events = server.receive();
    let defeats: Vec<_> = server_events.read::<DefeatEvent>().collect();
    assert_eq!(defeats, vec![character]);
}

#[test]
fn overkill_clamps_at_zero_with_single_defeat() {
    let (mut server, mut client, character) = connected_pair_with_character(50.0);

    client
        .request_damage(&character, 30.0)
        .expect("request failed");
    client
        .request_damage(&character, 200.0)
        .expect("request failed");
    let (_, mut client_events) = exchange_packets(&mut server, &mut [&mut client]);

    assert_eq!(server.health(&character), Some(0.0));
    let defeats: Vec<_> = client_events[0].read::<ClientDefeatEvent>().collect();
    assert_eq!(defeats, vec![character]);
}

#[test]
fn damage_after_defeat_changes_nothing() {
    let (mut server, mut client, character) = connected_pair_with_character(50.0);

    client
        .request_damage(&character, 50.0)
        .expect("request failed");
    exchange_packets(&mut server, &mut [&mut client]);
    server.receive();

    client
        .request_damage(&character, 10.0)
        .expect("request failed");
    let (_, mut client_events) = exchange_packets(&mut server, &mut [&mut client]);

    assert_eq!(server.health(&character), Some(0.0));
    let updates: Vec<_> = client_events[0].read::<UpdateHealthEvent>().collect();
    assert!(updates.is_empty());
    let defeats: Vec<_> = client_events[0].read::<ClientDefeatEvent>().collect();
    assert!(defeats.is_empty());
}

#[test]
fn heal_after_defeat_is_a_no_op() {
    let (mut server, mut client, character) = connected_pair_with_character(50.0);

    client
        .request_damage(&character, 50.0)
        .expect("request failed");
    exchange_packets(&mut server, &mut [&mut client]);

    client.request_heal(&character, 50.0).expect("request failed");
    exchange_packets(&mut server, &mut [&mut client]);

    // no revival: the record stays defeated at zero
    assert_eq!(server.health(&character), Some(0.0));
    assert_eq!(server.vitality(&character), Some(Vitality::Defeated));
    assert_eq!(client.health(&character), Some(0.0));
    assert_eq!(client.vitality(&character), Some(Vitality::Defeated));
}

//! The validation hook: invalid amounts are dropped at the client before
//! the relay, and the authority rejects bad input at its own API edge.

use vital_client::{Client, UpdateHealthEvent, VitalClientError};
use vital_server::{Server, ServerConfig, VitalServerError};
use vital_shared::{BigMapKey, CharacterKey};
use vital_test::{connect_pair, exchange_packets, protocol};

fn connected_pair_with_character(max: f32) -> (Server, Client, CharacterKey) {
    let mut server = Server::new(ServerConfig::default(), protocol());
    let mut client = Client::new(protocol());
    connect_pair(&mut server, &mut client);
    let character = server.spawn_character(max).expect("spawn failed");
    exchange_packets(&mut server, &mut [&mut client]);
    (server, client, character)
}

#[test]
fn negative_damage_request_never_reaches_the_ledger() {
    let (mut server, mut client, character) = connected_pair_with_character(100.0);

    client
        .request_damage(&character, -25.0)
        .expect("request should be dropped, not fail");
    let (_, mut client_events) = exchange_packets(&mut server, &mut [&mut client]);

    assert_eq!(server.health(&character), Some(100.0));
    assert_eq!(client.health(&character), Some(100.0));
    let updates: Vec<_> = client_events[0].read::<UpdateHealthEvent>().collect();
    assert!(updates.is_empty());
}

#[test]
fn nan_heal_request_never_reaches_the_ledger() {
    let (mut server, mut client, character) = connected_pair_with_character(100.0);

    server.apply_damage(&character, 40.0).expect("damage failed");
    exchange_packets(&mut server, &mut [&mut client]);

    client
        .request_heal(&character, f32::NAN)
        .expect("request should be dropped, not fail");
    exchange_packets(&mut server, &mut [&mut client]);

    assert_eq!(server.health(&character), Some(60.0));
    assert_eq!(client.health(&character), Some(60.0));
}

#[test]
fn request_for_unknown_character_errors_locally() {
    let (_server, mut client, _character) = connected_pair_with_character(100.0);

    let bogus = CharacterKey::from_u64(9999);
    let result = client.request_damage(&bogus, 10.0);
    assert!(matches!(result, Err(VitalClientError::UnknownCharacter)));
}

#[test]
fn authority_rejects_invalid_amounts_at_the_api_edge() {
    let (mut server, _client, character) = connected_pair_with_character(100.0);

    let result = server.apply_damage(&character, -5.0);
    assert!(matches!(result, Err(VitalServerError::Health(_))));
    let result = server.heal(&character, f32::INFINITY);
    assert!(matches!(result, Err(VitalServerError::Health(_))));

    assert_eq!(server.health(&character), Some(100.0));
}

#[test]
fn spawn_rejects_invalid_max_health() {
    let mut server = Server::new(ServerConfig::default(), protocol());

    assert!(matches!(
        server.spawn_character(0.0),
        Err(VitalServerError::Health(_))
    ));
    assert!(matches!(
        server.spawn_character(-10.0),
        Err(VitalServerError::Health(_))
    ));
    assert!(matches!(
        server.spawn_character(f32::NAN),
        Err(VitalServerError::Health(_))
    ));
    assert!(server.character_keys().is_empty());
}

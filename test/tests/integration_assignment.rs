//! Character assignment: the assignment notice goes to one user only, and
//! assignments are cleaned up on despawn and on disconnect.

use vital_client::{AssignCharacterEvent, Client};
use vital_server::{DisconnectEvent, Server, ServerConfig};
use vital_test::{connect_pair, exchange_packets, flush_server_to_clients, protocol};

#[test]
fn assignment_notice_goes_to_one_user_only() {
    let mut server = Server::new(ServerConfig::default(), protocol());
    let mut client_a = Client::new(protocol());
    let mut client_b = Client::new(protocol());
    let user_a = connect_pair(&mut server, &mut client_a);
    connect_pair(&mut server, &mut client_b);

    let character = server.spawn_character(100.0).expect("spawn failed");
    exchange_packets(&mut server, &mut [&mut client_a, &mut client_b]);

    server
        .assign_character(&character, &user_a)
        .expect("assign failed");
    let mut client_events =
        flush_server_to_clients(&mut server, &mut [&mut client_a, &mut client_b]);

    let assigns_a: Vec<_> = client_events[0].read::<AssignCharacterEvent>().collect();
    assert_eq!(assigns_a, vec![character]);
    assert!(client_a.is_assigned(&character));

    let assigns_b: Vec<_> = client_events[1].read::<AssignCharacterEvent>().collect();
    assert!(assigns_b.is_empty());
    assert!(!client_b.is_assigned(&character));

    let user = server.user(&user_a).expect("user missing");
    assert!(user.has_character(&character));
}

#[test]
fn despawn_clears_assignments() {
    let mut server = Server::new(ServerConfig::default(), protocol());
    let mut client = Client::new(protocol());
    let user_key = connect_pair(&mut server, &mut client);

    let character = server.spawn_character(100.0).expect("spawn failed");
    exchange_packets(&mut server, &mut [&mut client]);
    server
        .assign_character(&character, &user_key)
        .expect("assign failed");
    flush_server_to_clients(&mut server, &mut [&mut client]);

    server.despawn_character(&character).expect("despawn failed");
    flush_server_to_clients(&mut server, &mut [&mut client]);

    assert!(!client.is_assigned(&character));
    let user = server.user(&user_key).expect("user missing");
    assert!(!user.has_character(&character));
}

#[test]
fn disconnect_returns_the_user_with_their_assignments() {
    let mut server = Server::new(ServerConfig::default(), protocol());
    let mut client = Client::new(protocol());
    let user_key = connect_pair(&mut server, &mut client);

    let character = server.spawn_character(100.0).expect("spawn failed");
    exchange_packets(&mut server, &mut [&mut client]);
    server
        .assign_character(&character, &user_key)
        .expect("assign failed");
    flush_server_to_clients(&mut server, &mut [&mut client]);

    server.disconnect_user(&user_key).expect("disconnect failed");
    let mut server_events = server.receive();
    let disconnections: Vec<_> = server_events.read::<DisconnectEvent>().collect();
    assert_eq!(disconnections.len(), 1);
    let (key, user) = &disconnections[0];
    assert_eq!(*key, user_key);
    assert!(user.has_character(&character));
    assert_eq!(server.users_count(), 0);
}

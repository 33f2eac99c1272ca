//! Message relay outside the ledger's own traffic: targeted sends,
//! broadcasts, and the multicast loopback that lets the server hear its
//! own broadcast.

use vital_client::{Client, MessageEvent as ClientMessageEvent};
use vital_server::{LoopbackMessageEvent, MessageEvent, Server, ServerConfig};
use vital_shared::transport::local::LocalTransportPair;
use vital_shared::{BroadcastChannel, ChannelKind, MessageContainer, Packet, RequestChannel};
use vital_test::{connect_pair, exchange_packets, flush_server_to_clients, protocol, Announcement};

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

#[test]
fn client_message_reaches_server_with_sender_key() {
    init_logging();
    let mut server = Server::new(ServerConfig::default(), protocol());
    let mut client = Client::new(protocol());
    let user_key = connect_pair(&mut server, &mut client);

    client
        .send_message::<RequestChannel, Announcement>(&Announcement::new("hello"))
        .expect("send failed");
    let (mut server_events, _) = exchange_packets(&mut server, &mut [&mut client]);

    let received: Vec<_> = server_events
        .read::<MessageEvent<RequestChannel, Announcement>>()
        .collect();
    assert_eq!(received, vec![(user_key, Announcement::new("hello"))]);
}

#[test]
fn targeted_send_reaches_only_that_user() {
    let mut server = Server::new(ServerConfig::default(), protocol());
    let mut client_a = Client::new(protocol());
    let mut client_b = Client::new(protocol());
    let user_a = connect_pair(&mut server, &mut client_a);
    connect_pair(&mut server, &mut client_b);

    server
        .send_message::<BroadcastChannel, Announcement>(&user_a, &Announcement::new("just you"))
        .expect("send failed");
    let mut client_events =
        flush_server_to_clients(&mut server, &mut [&mut client_a, &mut client_b]);

    let to_a: Vec<_> = client_events[0]
        .read::<ClientMessageEvent<BroadcastChannel, Announcement>>()
        .collect();
    assert_eq!(to_a, vec![Announcement::new("just you")]);
    let to_b: Vec<_> = client_events[1]
        .read::<ClientMessageEvent<BroadcastChannel, Announcement>>()
        .collect();
    assert!(to_b.is_empty());
}

#[test]
fn broadcast_reaches_every_client_but_not_server_by_default() {
    let mut server = Server::new(ServerConfig::default(), protocol());
    let mut client_a = Client::new(protocol());
    let mut client_b = Client::new(protocol());
    connect_pair(&mut server, &mut client_a);
    connect_pair(&mut server, &mut client_b);

    server.broadcast_message::<BroadcastChannel, Announcement>(&Announcement::new("all hands"));
    let mut client_events =
        flush_server_to_clients(&mut server, &mut [&mut client_a, &mut client_b]);

    for events in client_events.iter_mut() {
        let received: Vec<_> = events
            .read::<ClientMessageEvent<BroadcastChannel, Announcement>>()
            .collect();
        assert_eq!(received, vec![Announcement::new("all hands")]);
    }

    let mut server_events = server.receive();
    assert!(!server_events.has::<LoopbackMessageEvent<BroadcastChannel, Announcement>>());
    let own: Vec<_> = server_events
        .read::<LoopbackMessageEvent<BroadcastChannel, Announcement>>()
        .collect();
    assert!(own.is_empty());
}

#[test]
fn multicast_loopback_delivers_to_server_too() {
    let config = ServerConfig {
        multicast_loopback: true,
    };
    let mut server = Server::new(config, protocol());
    let mut client = Client::new(protocol());
    connect_pair(&mut server, &mut client);

    server.broadcast_message::<BroadcastChannel, Announcement>(&Announcement::new("everyone"));
    let mut client_events = flush_server_to_clients(&mut server, &mut [&mut client]);

    let received: Vec<_> = client_events[0]
        .read::<ClientMessageEvent<BroadcastChannel, Announcement>>()
        .collect();
    assert_eq!(received, vec![Announcement::new("everyone")]);

    let mut server_events = server.receive();
    let own: Vec<_> = server_events
        .read::<LoopbackMessageEvent<BroadcastChannel, Announcement>>()
        .collect();
    assert_eq!(own, vec![Announcement::new("everyone")]);
}

#[test]
fn bad_channel_packet_is_skipped_without_stalling_the_connection() {
    init_logging();
    let mut server = Server::new(ServerConfig::default(), protocol());
    let pair = LocalTransportPair::new();
    let user_key = server.connect_user(pair.server_sender, pair.server_receiver);

    // Push a packet on a channel the server never receives on, then a valid
    // one behind it. The bad packet is logged and dropped; the valid one
    // still arrives.
    pair.client_sender
        .send(Packet {
            channel: ChannelKind::of::<BroadcastChannel>(),
            message_index: 0,
            message: MessageContainer::from_message(Box::new(Announcement::new("bogus"))),
        })
        .expect("send failed");
    pair.client_sender
        .send(Packet {
            channel: ChannelKind::of::<RequestChannel>(),
            message_index: 0,
            message: MessageContainer::from_message(Box::new(Announcement::new("real"))),
        })
        .expect("send failed");

    let mut server_events = server.receive();
    let received: Vec<_> = server_events
        .read::<MessageEvent<RequestChannel, Announcement>>()
        .collect();
    assert_eq!(received, vec![(user_key, Announcement::new("real"))]);
}

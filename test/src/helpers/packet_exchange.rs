use vital_client::Client;
use vital_server::{Server, UserKey};
use vital_shared::transport::local::LocalTransportPair;

/// Wire a client and server together over an in-memory transport
pub fn connect_pair(server: &mut Server, client: &mut Client) -> UserKey {
    let pair = LocalTransportPair::new();
    let user_key = server.connect_user(pair.server_sender, pair.server_receiver);
    client
        .connect(pair.client_sender, pair.client_receiver)
        .expect("client already connected");
    user_key
}

/// Flush every client's outgoing queue, then let the server ingest it.
/// Returns the server's events for the exchange.
pub fn flush_client_to_server(
    server: &mut Server,
    clients: &mut [&mut Client],
) -> vital_server::Events {
    for client in clients.iter_mut() {
        client.send_all_packets();
    }
    server.receive()
}

/// Flush the server's replication updates and queued messages, then let
/// every client ingest them. Returns each client's events, in client order.
pub fn flush_server_to_clients(
    server: &mut Server,
    clients: &mut [&mut Client],
) -> Vec<vital_client::Events> {
    server.send_all_updates();
    clients
        .iter_mut()
        .map(|client| client.receive())
        .collect()
}

/// One full round trip: clients -> server -> clients
pub fn exchange_packets(
    server: &mut Server,
    clients: &mut [&mut Client],
) -> (vital_server::Events, Vec<vital_client::Events>) {
    let server_events = flush_client_to_server(server, clients);
    let client_events = flush_server_to_clients(server, clients);
    (server_events, client_events)
}

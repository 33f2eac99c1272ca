//! In-memory transport implementation.
//! Routes packets between server and client without network I/O, with the
//! same guarantees the design assumes of the engine transport: every packet
//! is delivered, in send order.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use crate::transport::{Packet, PacketReceiver, PacketSender, TransportError};

type PacketQueue = Arc<Mutex<VecDeque<Packet>>>;

/// Pair of connected server and client endpoints
pub struct LocalTransportPair {
    pub server_sender: Box<dyn PacketSender>,
    pub server_receiver: Box<dyn PacketReceiver>,
    pub client_sender: Box<dyn PacketSender>,
    pub client_receiver: Box<dyn PacketReceiver>,
}

impl LocalTransportPair {
    pub fn new() -> Self {
        let server_to_client_queue: PacketQueue = Arc::new(Mutex::new(VecDeque::new()));
        let client_to_server_queue: PacketQueue = Arc::new(Mutex::new(VecDeque::new()));

        Self {
            server_sender: Box::new(LocalPacketSender {
                queue: server_to_client_queue.clone(),
            }),
            server_receiver: Box::new(LocalPacketReceiver {
                queue: client_to_server_queue.clone(),
            }),
            client_sender: Box::new(LocalPacketSender {
                queue: client_to_server_queue,
            }),
            client_receiver: Box::new(LocalPacketReceiver {
                queue: server_to_client_queue,
            }),
        }
    }
}

impl Default for LocalTransportPair {
    fn default() -> Self {
        Self::new()
    }
}

struct LocalPacketSender {
    queue: PacketQueue,
}

impl PacketSender for LocalPacketSender {
    fn send(&self, packet: Packet) -> Result<(), TransportError> {
        let mut queue = self
            .queue
            .lock()
            .map_err(|_| TransportError::ConnectionClosed)?;
        queue.push_back(packet);
        Ok(())
    }
}

struct LocalPacketReceiver {
    queue: PacketQueue,
}

impl PacketReceiver for LocalPacketReceiver {
    fn receive(&mut self) -> Result<Option<Packet>, TransportError> {
        let mut queue = self
            .queue
            .lock()
            .map_err(|_| TransportError::ConnectionClosed)?;
        Ok(queue.pop_front())
    }
}

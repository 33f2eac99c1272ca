use std::collections::{HashMap, HashSet};

use log::{info, warn};

use vital_shared::{
    Channel, ChannelKind, ChannelKinds, CharacterAssigned, CharacterDespawned, CharacterKey,
    CharacterSpawned, DamageRequest, DefeatedNotice, HealRequest, HealthRecord, HealthUpdate,
    Message, MessageContainer, MessageKind, MessageKinds, PacketReceiver, PacketSender, Protocol,
    RequestChannel, Vitality,
};

use crate::{connection::Connection, error::VitalClientError, events::Events};

/// The observing host. Keeps a replica of the server's health ledger in
/// sync and relays damage/heal requests to the authority; it never mutates
/// health on its own.
pub struct Client {
    // Config
    channel_kinds: ChannelKinds,
    message_kinds: MessageKinds,
    // Connection
    connection: Option<Connection>,
    // Replica
    characters: HashMap<CharacterKey, HealthRecord>,
    assigned_characters: HashSet<CharacterKey>,
    // Events
    incoming_events: Events,
}

impl Client {
    /// Create a new Client, given a Protocol.
    /// Locks the Protocol: no further channels or messages may be added.
    pub fn new(mut protocol: Protocol) -> Self {
        protocol.lock();
        let protocol = protocol.build();

        Self {
            channel_kinds: protocol.channel_kinds,
            message_kinds: protocol.message_kinds,
            connection: None,
            characters: HashMap::new(),
            assigned_characters: HashSet::new(),
            incoming_events: Events::new(),
        }
    }

    // Connection

    /// Open a connection to the server over the given transport endpoints
    pub fn connect(
        &mut self,
        sender: Box<dyn PacketSender>,
        receiver: Box<dyn PacketReceiver>,
    ) -> Result<(), VitalClientError> {
        if self.connection.is_some() {
            return Err(VitalClientError::AlreadyConnected);
        }
        self.connection = Some(Connection::new(&self.channel_kinds, sender, receiver));
        info!("connected to server");
        self.incoming_events.push_connection();
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Close the connection. The local replica is torn down with it.
    pub fn disconnect(&mut self) -> Result<(), VitalClientError> {
        if self.connection.take().is_none() {
            return Err(VitalClientError::NotConnected);
        }
        self.characters.clear();
        self.assigned_characters.clear();
        info!("disconnected from server");
        Ok(())
    }

    // Requests

    /// Relay a damage request to the authority. An invalid amount is dropped
    /// here, before the relay, and never reaches the wire.
    pub fn request_damage(
        &mut self,
        character_key: &CharacterKey,
        amount: f32,
    ) -> Result<(), VitalClientError> {
        if !self.characters.contains_key(character_key) {
            return Err(VitalClientError::UnknownCharacter);
        }
        let request = DamageRequest::new(*character_key, amount);
        self.send_message::<RequestChannel, DamageRequest>(&request)
    }

    /// Relay a heal request to the authority. An invalid amount is dropped
    /// here, before the relay, and never reaches the wire.
    pub fn request_heal(
        &mut self,
        character_key: &CharacterKey,
        amount: f32,
    ) -> Result<(), VitalClientError> {
        if !self.characters.contains_key(character_key) {
            return Err(VitalClientError::UnknownCharacter);
        }
        let request = HealRequest::new(*character_key, amount);
        self.send_message::<RequestChannel, HealRequest>(&request)
    }

    /// Queue a message for the server
    pub fn send_message<C: Channel, M: Message>(
        &mut self,
        message: &M,
    ) -> Result<(), VitalClientError> {
        let Some(connection) = self.connection.as_mut() else {
            return Err(VitalClientError::NotConnected);
        };
        connection.queue_message(
            &self.message_kinds,
            &ChannelKind::of::<C>(),
            MessageContainer::from_message(message.clone_box()),
        )?;
        Ok(())
    }

    // Replica

    pub fn character_keys(&self) -> Vec<CharacterKey> {
        self.characters.keys().copied().collect()
    }

    pub fn has_character(&self, character_key: &CharacterKey) -> bool {
        self.characters.contains_key(character_key)
    }

    pub fn health(&self, character_key: &CharacterKey) -> Option<f32> {
        self.characters.get(character_key).map(|r| r.current())
    }

    pub fn max_health(&self, character_key: &CharacterKey) -> Option<f32> {
        self.characters.get(character_key).map(|r| r.max())
    }

    pub fn vitality(&self, character_key: &CharacterKey) -> Option<Vitality> {
        self.characters.get(character_key).map(|r| r.vitality())
    }

    pub fn is_assigned(&self, character_key: &CharacterKey) -> bool {
        self.assigned_characters.contains(character_key)
    }

    pub fn assigned_character_keys(&self) -> Vec<CharacterKey> {
        self.assigned_characters.iter().copied().collect()
    }

    // Main loop

    /// Read the transport, apply replication updates to the local replica,
    /// and return the accumulated Events
    pub fn receive(&mut self) -> Events {
        let mut incoming: Vec<(ChannelKind, MessageContainer)> = Vec::new();
        if let Some(connection) = self.connection.as_mut() {
            if let Err(error) = connection.read_packets(&self.message_kinds) {
                self.incoming_events.push_error(error.into());
            }
            incoming = connection.receive_messages();
        }

        for (channel_kind, message) in incoming {
            self.route_incoming(&channel_kind, message);
        }

        self.incoming_events.take()
    }

    /// Sends all queued outgoing messages to the Server. If you don't call
    /// this method, the Client will never communicate with the Server.
    pub fn send_all_packets(&mut self) {
        if let Some(connection) = self.connection.as_mut() {
            if let Err(error) = connection.send_packets() {
                self.incoming_events.push_error(error.into());
            }
        }
    }

    // Internal

    fn route_incoming(&mut self, channel_kind: &ChannelKind, message: MessageContainer) {
        let message_kind = message.kind();
        if message_kind == MessageKind::of::<HealthUpdate>() {
            if let Ok(update) = message.to_boxed_any().downcast::<HealthUpdate>() {
                self.receive_health_update(*update);
            }
        } else if message_kind == MessageKind::of::<DefeatedNotice>() {
            if let Ok(notice) = message.to_boxed_any().downcast::<DefeatedNotice>() {
                self.receive_defeated_notice(*notice);
            }
        } else if message_kind == MessageKind::of::<CharacterSpawned>() {
            if let Ok(spawn) = message.to_boxed_any().downcast::<CharacterSpawned>() {
                self.receive_character_spawned(*spawn);
            }
        } else if message_kind == MessageKind::of::<CharacterDespawned>() {
            if let Ok(despawn) = message.to_boxed_any().downcast::<CharacterDespawned>() {
                self.receive_character_despawned(*despawn);
            }
        } else if message_kind == MessageKind::of::<CharacterAssigned>() {
            if let Ok(assigned) = message.to_boxed_any().downcast::<CharacterAssigned>() {
                self.receive_character_assigned(*assigned);
            }
        } else {
            self.incoming_events.push_message(channel_kind, message);
        }
    }

    fn receive_health_update(&mut self, update: HealthUpdate) {
        let Some(record) = self.characters.get_mut(&update.character) else {
            warn!("health update for unknown character, dropping");
            return;
        };
        match record.receive_update(update.current_health) {
            Ok(outcome) => {
                self.incoming_events
                    .push_update(&update.character, outcome.current);
            }
            Err(error) => {
                warn!("health update rejected by replica: {error}");
                self.incoming_events.push_error(error.into());
            }
        }
    }

    fn receive_defeated_notice(&mut self, notice: DefeatedNotice) {
        if !self.characters.contains_key(&notice.character) {
            warn!("defeat notice for unknown character, dropping");
            return;
        }
        self.incoming_events.push_defeat(&notice.character);
    }

    fn receive_character_spawned(&mut self, spawn: CharacterSpawned) {
        match HealthRecord::new_remote(spawn.max_health, spawn.current_health) {
            Ok(record) => {
                self.characters.insert(spawn.character, record);
                self.incoming_events.push_spawn(&spawn.character);
            }
            Err(error) => {
                warn!("spawn rejected by replica: {error}");
                self.incoming_events.push_error(error.into());
            }
        }
    }

    fn receive_character_despawned(&mut self, despawn: CharacterDespawned) {
        if self.characters.remove(&despawn.character).is_none() {
            warn!("despawn for unknown character, dropping");
            return;
        }
        self.assigned_characters.remove(&despawn.character);
        self.incoming_events.push_despawn(&despawn.character);
    }

    fn receive_character_assigned(&mut self, assigned: CharacterAssigned) {
        if !self.characters.contains_key(&assigned.character) {
            warn!("assignment for unknown character, dropping");
            return;
        }
        self.assigned_characters.insert(assigned.character);
        self.incoming_events.push_assign(&assigned.character);
    }
}

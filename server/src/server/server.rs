use std::{
    collections::HashMap,
    mem,
    sync::{Arc, RwLock},
};

use log::{info, warn};

use vital_shared::{
    BigMap, BroadcastChannel, Channel, ChannelKind, ChannelKinds, CharacterAssigned,
    CharacterDespawned, CharacterKey, CharacterSpawned, DamageRequest, DefeatedNotice,
    GlobalDiffHandler, HealRequest, HealthOutcome, HealthRecord, HealthUpdate, Message,
    MessageContainer, MessageKind, MessageKinds, PacketReceiver, PacketSender, Protocol, Vitality,
};

use crate::{
    connection::Connection,
    error::VitalServerError,
    events::Events,
    server::ServerConfig,
    user::{User, UserKey},
};

/// The authoritative host. Owns the health ledger, validates and executes
/// relayed requests from clients, and pushes replication updates out to
/// every connection.
pub struct Server {
    // Config
    server_config: ServerConfig,
    channel_kinds: ChannelKinds,
    message_kinds: MessageKinds,
    // Users
    users: BigMap<UserKey, User>,
    user_connections: HashMap<UserKey, Connection>,
    // Ledger
    characters: BigMap<CharacterKey, HealthRecord>,
    diff_handler: Arc<RwLock<GlobalDiffHandler<CharacterKey>>>,
    pending_defeats: Vec<CharacterKey>,
    // Events
    incoming_events: Events,
}

impl Server {
    /// Create a new Server, given a ServerConfig and a Protocol.
    /// Locks the Protocol: no further channels or messages may be added.
    pub fn new(server_config: ServerConfig, mut protocol: Protocol) -> Self {
        protocol.lock();
        let protocol = protocol.build();

        Self {
            server_config,
            channel_kinds: protocol.channel_kinds,
            message_kinds: protocol.message_kinds,
            users: BigMap::new(),
            user_connections: HashMap::new(),
            characters: BigMap::new(),
            diff_handler: Arc::new(RwLock::new(GlobalDiffHandler::new())),
            pending_defeats: Vec::new(),
            incoming_events: Events::new(),
        }
    }

    // Connections

    /// Accept a new client over the given transport endpoints. The new
    /// connection immediately receives a spawn message for every live
    /// character, so late joiners see the current ledger.
    pub fn connect_user(
        &mut self,
        sender: Box<dyn PacketSender>,
        receiver: Box<dyn PacketReceiver>,
    ) -> UserKey {
        let user_key = self.users.insert(User::new());
        let mut connection = Connection::new(user_key, &self.channel_kinds, sender, receiver);

        for (character_key, record) in self.characters.iter() {
            let spawn = CharacterSpawned::new(character_key, record.max(), record.current());
            if let Err(error) = connection.queue_message(
                &self.message_kinds,
                &ChannelKind::of::<BroadcastChannel>(),
                MessageContainer::from_message(Box::new(spawn)),
            ) {
                self.incoming_events.push_error(error.into());
            }
        }

        self.user_connections.insert(user_key, connection);
        info!("user {user_key:?} connected");
        self.incoming_events.push_connection(&user_key);
        user_key
    }

    /// Drop the user's connection. Their character assignments go with them;
    /// the characters themselves stay in the ledger.
    pub fn disconnect_user(&mut self, user_key: &UserKey) -> Result<(), VitalServerError> {
        self.user_connections.remove(user_key);
        let user = self
            .users
            .remove(user_key)
            .ok_or(VitalServerError::UnknownUser)?;
        info!("user {user_key:?} disconnected");
        self.incoming_events.push_disconnection(user_key, user);
        Ok(())
    }

    pub fn user(&self, user_key: &UserKey) -> Option<&User> {
        self.users.get(user_key)
    }

    pub fn user_keys(&self) -> Vec<UserKey> {
        self.users.keys().collect()
    }

    pub fn users_count(&self) -> usize {
        self.users.len()
    }

    // Characters

    /// Create a new character at full health and announce it to every
    /// connected client
    pub fn spawn_character(&mut self, max_health: f32) -> Result<CharacterKey, VitalServerError> {
        let record = HealthRecord::new(max_health)?;
        let character_key = self.characters.insert(record);

        let mutator = GlobalDiffHandler::register_record(
            &self.diff_handler,
            character_key,
            HealthRecord::DIFF_MASK_BYTES,
        );
        if let Some(record) = self.characters.get_mut(&character_key) {
            record.set_mutator(&mutator);
        }

        info!("character {character_key:?} spawned with max health {max_health}");
        let spawn = CharacterSpawned::new(character_key, max_health, max_health);
        self.broadcast_container(
            &ChannelKind::of::<BroadcastChannel>(),
            MessageContainer::from_message(Box::new(spawn)),
        );
        Ok(character_key)
    }

    /// Remove a character from the ledger and announce the despawn
    pub fn despawn_character(&mut self, character_key: &CharacterKey) -> Result<(), VitalServerError> {
        if self.characters.remove(character_key).is_none() {
            return Err(VitalServerError::UnknownCharacter);
        }
        if let Ok(mut handler) = self.diff_handler.write() {
            handler.deregister_record(character_key);
        }
        self.pending_defeats.retain(|key| key != character_key);
        for (_, user) in self.users.iter_mut() {
            user.unassign_character(character_key);
        }

        info!("character {character_key:?} despawned");
        let despawn = CharacterDespawned::new(*character_key);
        self.broadcast_container(
            &ChannelKind::of::<BroadcastChannel>(),
            MessageContainer::from_message(Box::new(despawn)),
        );
        Ok(())
    }

    /// Give a user control of a character and tell that user (and only that
    /// user) about it
    pub fn assign_character(
        &mut self,
        character_key: &CharacterKey,
        user_key: &UserKey,
    ) -> Result<(), VitalServerError> {
        if !self.characters.contains_key(character_key) {
            return Err(VitalServerError::UnknownCharacter);
        }
        let Some(user) = self.users.get_mut(user_key) else {
            return Err(VitalServerError::UnknownUser);
        };
        user.assign_character(character_key);

        let assigned = CharacterAssigned::new(*character_key);
        self.queue_for_user(
            user_key,
            &ChannelKind::of::<BroadcastChannel>(),
            MessageContainer::from_message(Box::new(assigned)),
        )
    }

    pub fn character_keys(&self) -> Vec<CharacterKey> {
        self.characters.keys().collect()
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

    // Ledger mutations

    /// Apply damage on the authority. The change reaches clients on the next
    /// `send_all_updates` call.
    pub fn apply_damage(
        &mut self,
        character_key: &CharacterKey,
        amount: f32,
    ) -> Result<HealthOutcome, VitalServerError> {
        let record = self
            .characters
            .get_mut(character_key)
            .ok_or(VitalServerError::UnknownCharacter)?;
        let outcome = record.apply_damage(amount)?;
        if outcome.defeated {
            self.pending_defeats.push(*character_key);
        }
        Ok(outcome)
    }

    /// Apply healing on the authority. Healing a defeated character is a
    /// no-op.
    pub fn heal(
        &mut self,
        character_key: &CharacterKey,
        amount: f32,
    ) -> Result<HealthOutcome, VitalServerError> {
        let record = self
            .characters
            .get_mut(character_key)
            .ok_or(VitalServerError::UnknownCharacter)?;
        let outcome = record.heal(amount)?;
        Ok(outcome)
    }

    // Messages

    /// Queue a message for one user
    pub fn send_message<C: Channel, M: Message>(
        &mut self,
        user_key: &UserKey,
        message: &M,
    ) -> Result<(), VitalServerError> {
        self.queue_for_user(
            user_key,
            &ChannelKind::of::<C>(),
            MessageContainer::from_message(message.clone_box()),
        )
    }

    /// Queue a message for every connected user. With `multicast_loopback`
    /// enabled, the Server also hears its own broadcast through
    /// `LoopbackMessageEvent`.
    pub fn broadcast_message<C: Channel, M: Message>(&mut self, message: &M) {
        let channel_kind = ChannelKind::of::<C>();
        let container = MessageContainer::from_message(message.clone_box());
        self.broadcast_container(&channel_kind, container.clone());
        if self.server_config.multicast_loopback {
            if container.validate() {
                self.incoming_events.push_loopback(&channel_kind, container);
            } else {
                warn!(
                    "own broadcast `{}` failed validation, not delivering locally",
                    container.name()
                );
            }
        }
    }

    // Main loop

    /// Read every connection's transport, execute relayed requests against
    /// the ledger, and return the accumulated Events
    pub fn receive(&mut self) -> Events {
        let mut incoming: Vec<(UserKey, ChannelKind, MessageContainer)> = Vec::new();
        for (user_key, connection) in self.user_connections.iter_mut() {
            if let Err(error) = connection.read_packets(&self.message_kinds) {
                self.incoming_events.push_error(error.into());
            }
            for (channel_kind, message) in connection.receive_messages() {
                incoming.push((*user_key, channel_kind, message));
            }
        }

        for (user_key, channel_kind, message) in incoming {
            let message_kind = message.kind();
            if message_kind == MessageKind::of::<DamageRequest>() {
                if let Ok(request) = message.to_boxed_any().downcast::<DamageRequest>() {
                    self.receive_damage_request(&user_key, *request);
                }
            } else if message_kind == MessageKind::of::<HealRequest>() {
                if let Ok(request) = message.to_boxed_any().downcast::<HealRequest>() {
                    self.receive_heal_request(&user_key, *request);
                }
            } else {
                self.incoming_events
                    .push_message(&user_key, &channel_kind, message);
            }
        }

        self.incoming_events.take()
    }

    /// Sends all pending replication updates and queued messages to all
    /// Clients. If you don't call this method, the Server will never
    /// communicate with its connected Clients.
    pub fn send_all_updates(&mut self) {
        // one update per dirty record, then the defeat notices behind them
        let dirty = match self.diff_handler.write() {
            Ok(mut handler) => handler.take_dirty(),
            Err(_) => Vec::new(),
        };
        for (character_key, diff_mask) in dirty {
            if diff_mask.bit(HealthRecord::CURRENT_HEALTH_INDEX) != Some(true) {
                continue;
            }
            // record may have despawned after the mutation
            let Some(record) = self.characters.get(&character_key) else {
                continue;
            };
            let current = record.current();
            let update = HealthUpdate::new(character_key, current);
            self.broadcast_container(
                &ChannelKind::of::<BroadcastChannel>(),
                MessageContainer::from_message(Box::new(update)),
            );
            self.incoming_events.push_health_change(&character_key, current);
        }
        for character_key in mem::take(&mut self.pending_defeats) {
            let notice = DefeatedNotice::new(character_key);
            self.broadcast_container(
                &ChannelKind::of::<BroadcastChannel>(),
                MessageContainer::from_message(Box::new(notice)),
            );
            self.incoming_events.push_defeat(&character_key);
        }

        // shuffle order of connections in order to avoid priority among users
        let mut user_keys: Vec<UserKey> = self.user_connections.keys().copied().collect();
        fastrand::shuffle(&mut user_keys);

        for user_key in user_keys {
            let Some(connection) = self.user_connections.get_mut(&user_key) else {
                continue;
            };
            if let Err(error) = connection.send_packets() {
                self.incoming_events.push_error(error.into());
            }
        }
    }

    // Internal

    fn receive_damage_request(&mut self, user_key: &UserKey, request: DamageRequest) {
        if !self.characters.contains_key(&request.character) {
            warn!("damage request from {user_key:?} for unknown character, dropping");
            return;
        }
        if let Err(error) = self.apply_damage(&request.character, request.amount) {
            warn!("damage request from {user_key:?} rejected: {error}");
        }
    }

    fn receive_heal_request(&mut self, user_key: &UserKey, request: HealRequest) {
        if !self.characters.contains_key(&request.character) {
            warn!("heal request from {user_key:?} for unknown character, dropping");
            return;
        }
        if let Err(error) = self.heal(&request.character, request.amount) {
            warn!("heal request from {user_key:?} rejected: {error}");
        }
    }

    fn queue_for_user(
        &mut self,
        user_key: &UserKey,
        channel_kind: &ChannelKind,
        message: MessageContainer,
    ) -> Result<(), VitalServerError> {
        let Some(connection) = self.user_connections.get_mut(user_key) else {
            return Err(VitalServerError::UnknownUser);
        };
        connection.queue_message(&self.message_kinds, channel_kind, message)?;
        Ok(())
    }

    fn broadcast_container(&mut self, channel_kind: &ChannelKind, message: MessageContainer) {
        for connection in self.user_connections.values_mut() {
            if let Err(error) =
                connection.queue_message(&self.message_kinds, channel_kind, message.clone())
            {
                self.incoming_events.push_error(error.into());
            }
        }
    }
}

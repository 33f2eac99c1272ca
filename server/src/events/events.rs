use std::{any::Any, collections::HashMap, marker::PhantomData, mem, vec::IntoIter};

use log::warn;

use vital_shared::{
    Channel, ChannelKind, CharacterKey, Message, MessageContainer, MessageKind,
};

use crate::{
    error::VitalServerError,
    user::{User, UserKey},
};

pub struct Events {
    connections: Vec<UserKey>,
    disconnections: Vec<(UserKey, User)>,
    errors: Vec<VitalServerError>,
    messages: HashMap<ChannelKind, HashMap<MessageKind, Vec<(UserKey, MessageContainer)>>>,
    loopbacks: HashMap<ChannelKind, HashMap<MessageKind, Vec<MessageContainer>>>,
    health_changes: Vec<(CharacterKey, f32)>,
    defeats: Vec<CharacterKey>,
    empty: bool,
}

impl Events {
    pub(crate) fn new() -> Self {
        Self {
            connections: Vec::new(),
            disconnections: Vec::new(),
            errors: Vec::new(),
            messages: HashMap::new(),
            loopbacks: HashMap::new(),
            health_changes: Vec::new(),
            defeats: Vec::new(),
            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: Event>(&mut self) -> V::Iter {
        return V::iter(self);
    }

    pub fn has<V: Event>(&self) -> bool {
        return V::has(self);
    }

    // Crate-public

    pub(crate) fn push_connection(&mut self, user_key: &UserKey) {
        self.connections.push(*user_key);
        self.empty = false;
    }

    pub(crate) fn push_disconnection(&mut self, user_key: &UserKey, user: User) {
        self.disconnections.push((*user_key, user));
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: VitalServerError) {
        self.errors.push(error);
        self.empty = false;
    }

    pub(crate) fn push_message(
        &mut self,
        user_key: &UserKey,
        channel_kind: &ChannelKind,
        message: MessageContainer,
    ) {
        self.messages
            .entry(*channel_kind)
            .or_default()
            .entry(message.kind())
            .or_default()
            .push((*user_key, message));
        self.empty = false;
    }

    pub(crate) fn push_loopback(&mut self, channel_kind: &ChannelKind, message: MessageContainer) {
        self.loopbacks
            .entry(*channel_kind)
            .or_default()
            .entry(message.kind())
            .or_default()
            .push(message);
        self.empty = false;
    }

    pub(crate) fn push_health_change(&mut self, character_key: &CharacterKey, current: f32) {
        self.health_changes.push((*character_key, current));
        self.empty = false;
    }

    pub(crate) fn push_defeat(&mut self, character_key: &CharacterKey) {
        self.defeats.push(*character_key);
        self.empty = false;
    }

    pub(crate) fn take(&mut self) -> Events {
        mem::replace(self, Events::new())
    }
}

impl Drop for Events {
    fn drop(&mut self) {
        let unread = self.messages.values().any(|map| !map.is_empty())
            || self.loopbacks.values().any(|map| !map.is_empty());
        if unread {
            warn!("Events dropped with unread messages");
        }
    }
}

// Event Trait
pub trait Event {
    type Iter;

    fn iter(events: &mut Events) -> Self::Iter;

    fn has(events: &Events) -> bool;
}

// ConnectEvent
pub struct ConnectEvent;
impl Event for ConnectEvent {
    type Iter = IntoIter<UserKey>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.connections);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.connections.is_empty()
    }
}

// DisconnectEvent
pub struct DisconnectEvent;
impl Event for DisconnectEvent {
    type Iter = IntoIter<(UserKey, User)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.disconnections);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.disconnections.is_empty()
    }
}

// Error Event
pub struct ErrorEvent;
impl Event for ErrorEvent {
    type Iter = IntoIter<VitalServerError>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.errors);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.errors.is_empty()
    }
}

// Message Event
pub struct MessageEvent<C: Channel, M: Message> {
    phantom_c: PhantomData<C>,
    phantom_m: PhantomData<M>,
}
impl<C: Channel, M: Message> Event for MessageEvent<C, M> {
    type Iter = IntoIter<(UserKey, M)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let channel_kind: ChannelKind = ChannelKind::of::<C>();
        let Some(channel_map) = events.messages.get_mut(&channel_kind) else {
            return IntoIterator::into_iter(Vec::new());
        };
        let message_kind: MessageKind = MessageKind::of::<M>();
        let Some(messages) = channel_map.remove(&message_kind) else {
            return IntoIterator::into_iter(Vec::new());
        };
        return IntoIterator::into_iter(read_messages(messages));
    }

    fn has(events: &Events) -> bool {
        let channel_kind: ChannelKind = ChannelKind::of::<C>();
        if let Some(channel_map) = events.messages.get(&channel_kind) {
            let message_kind: MessageKind = MessageKind::of::<M>();
            return channel_map.contains_key(&message_kind);
        }
        return false;
    }
}

// Loopback Message Event

/// The authority's own copy of a broadcast it sent while
/// `multicast_loopback` is enabled
pub struct LoopbackMessageEvent<C: Channel, M: Message> {
    phantom_c: PhantomData<C>,
    phantom_m: PhantomData<M>,
}
impl<C: Channel, M: Message> Event for LoopbackMessageEvent<C, M> {
    type Iter = IntoIter<M>;

    fn iter(events: &mut Events) -> Self::Iter {
        let channel_kind: ChannelKind = ChannelKind::of::<C>();
        let Some(channel_map) = events.loopbacks.get_mut(&channel_kind) else {
            return IntoIterator::into_iter(Vec::new());
        };
        let message_kind: MessageKind = MessageKind::of::<M>();
        let Some(messages) = channel_map.remove(&message_kind) else {
            return IntoIterator::into_iter(Vec::new());
        };
        let list: Vec<M> = messages.into_iter().map(downcast_message).collect();
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        let channel_kind: ChannelKind = ChannelKind::of::<C>();
        if let Some(channel_map) = events.loopbacks.get(&channel_kind) {
            let message_kind: MessageKind = MessageKind::of::<M>();
            return channel_map.contains_key(&message_kind);
        }
        return false;
    }
}

// Health Change Event
pub struct HealthChangeEvent;
impl Event for HealthChangeEvent {
    type Iter = IntoIter<(CharacterKey, f32)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.health_changes);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.health_changes.is_empty()
    }
}

// Defeat Event
pub struct DefeatEvent;
impl Event for DefeatEvent {
    type Iter = IntoIter<CharacterKey>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.defeats);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.defeats.is_empty()
    }
}

pub(crate) fn read_messages<M: Message>(
    messages: Vec<(UserKey, MessageContainer)>,
) -> Vec<(UserKey, M)> {
    let mut output_list: Vec<(UserKey, M)> = Vec::new();

    for (user_key, message) in messages {
        output_list.push((user_key, downcast_message(message)));
    }

    output_list
}

fn downcast_message<M: Message>(message: MessageContainer) -> M {
    Box::<dyn Any + 'static>::downcast::<M>(message.to_boxed_any())
        .ok()
        .map(|boxed_m| *boxed_m)
        .unwrap()
}

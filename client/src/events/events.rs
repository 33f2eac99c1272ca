use std::{any::Any, collections::HashMap, marker::PhantomData, mem, vec::IntoIter};

use log::warn;

use vital_shared::{
    Channel, ChannelKind, CharacterKey, Message, MessageContainer, MessageKind,
};

use crate::error::VitalClientError;

pub struct Events {
    connections: Vec<()>,
    errors: Vec<VitalClientError>,
    messages: HashMap<ChannelKind, HashMap<MessageKind, Vec<MessageContainer>>>,
    spawns: Vec<CharacterKey>,
    despawns: Vec<CharacterKey>,
    assigns: Vec<CharacterKey>,
    updates: Vec<(CharacterKey, f32)>,
    defeats: Vec<CharacterKey>,
    empty: bool,
}

impl Events {
    pub(crate) fn new() -> Self {
        Self {
            connections: Vec::new(),
            errors: Vec::new(),
            messages: HashMap::new(),
            spawns: Vec::new(),
            despawns: Vec::new(),
            assigns: Vec::new(),
            updates: Vec::new(),
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

    pub(crate) fn push_connection(&mut self) {
        self.connections.push(());
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: VitalClientError) {
        self.errors.push(error);
        self.empty = false;
    }

    pub(crate) fn push_message(&mut self, channel_kind: &ChannelKind, message: MessageContainer) {
        self.messages
            .entry(*channel_kind)
            .or_default()
            .entry(message.kind())
            .or_default()
            .push(message);
        self.empty = false;
    }

    pub(crate) fn push_spawn(&mut self, character_key: &CharacterKey) {
        self.spawns.push(*character_key);
        self.empty = false;
    }

    pub(crate) fn push_despawn(&mut self, character_key: &CharacterKey) {
        self.despawns.push(*character_key);
        self.empty = false;
    }

    pub(crate) fn push_assign(&mut self, character_key: &CharacterKey) {
        self.assigns.push(*character_key);
        self.empty = false;
    }

    pub(crate) fn push_update(&mut self, character_key: &CharacterKey, current: f32) {
        self.updates.push((*character_key, current));
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
        if self.messages.values().any(|map| !map.is_empty()) {
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
    type Iter = IntoIter<()>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.connections);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.connections.is_empty()
    }
}

// Error Event
pub struct ErrorEvent;
impl Event for ErrorEvent {
    type Iter = IntoIter<VitalClientError>;

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
    type Iter = IntoIter<M>;

    fn iter(events: &mut Events) -> Self::Iter {
        let channel_kind: ChannelKind = ChannelKind::of::<C>();
        let Some(channel_map) = events.messages.get_mut(&channel_kind) else {
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
        if let Some(channel_map) = events.messages.get(&channel_kind) {
            let message_kind: MessageKind = MessageKind::of::<M>();
            return channel_map.contains_key(&message_kind);
        }
        return false;
    }
}

// Spawn Character Event
pub struct SpawnCharacterEvent;
impl Event for SpawnCharacterEvent {
    type Iter = IntoIter<CharacterKey>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.spawns);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.spawns.is_empty()
    }
}

// Despawn Character Event
pub struct DespawnCharacterEvent;
impl Event for DespawnCharacterEvent {
    type Iter = IntoIter<CharacterKey>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.despawns);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.despawns.is_empty()
    }
}

// Assign Character Event
pub struct AssignCharacterEvent;
impl Event for AssignCharacterEvent {
    type Iter = IntoIter<CharacterKey>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.assigns);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.assigns.is_empty()
    }
}

// Update Health Event
pub struct UpdateHealthEvent;
impl Event for UpdateHealthEvent {
    type Iter = IntoIter<(CharacterKey, f32)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.updates);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events) -> bool {
        !events.updates.is_empty()
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

fn downcast_message<M: Message>(message: MessageContainer) -> M {
    Box::<dyn Any + 'static>::downcast::<M>(message.to_boxed_any())
        .ok()
        .map(|boxed_m| *boxed_m)
        .unwrap()
}

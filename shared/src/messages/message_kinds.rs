use std::{any::TypeId, collections::HashMap};

use crate::messages::message::Message;

#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub struct MessageKind {
    type_id: TypeId,
}

impl MessageKind {
    pub fn of<M: Message>() -> Self {
        Self {
            type_id: TypeId::of::<M>(),
        }
    }
}

/// Registry of all Message types a Protocol carries. A Message must be
/// registered via Protocol::add_message() before it can be relayed.
pub struct MessageKinds {
    kind_map: HashMap<MessageKind, &'static str>,
}

impl MessageKinds {
    pub fn new() -> Self {
        Self {
            kind_map: HashMap::new(),
        }
    }

    pub fn add_message<M: Message>(&mut self) {
        let message_kind = MessageKind::of::<M>();
        self.kind_map
            .entry(message_kind)
            .or_insert(std::any::type_name::<M>());
    }

    pub fn has_kind(&self, message_kind: &MessageKind) -> bool {
        self.kind_map.contains_key(message_kind)
    }
}

impl Default for MessageKinds {
    fn default() -> Self {
        Self::new()
    }
}

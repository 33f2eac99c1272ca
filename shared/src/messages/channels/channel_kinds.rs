use std::{any::TypeId, collections::HashMap};

use crate::messages::{
    channels::channel::{Channel, ChannelSettings},
    error::ChannelError,
};

#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub struct ChannelKind {
    type_id: TypeId,
}

impl ChannelKind {
    pub fn of<C: Channel>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
        }
    }
}

/// Registry of all Channel types a Protocol carries, with their settings
pub struct ChannelKinds {
    kind_map: HashMap<ChannelKind, (ChannelSettings, &'static str)>,
}

impl ChannelKinds {
    pub fn new() -> Self {
        Self {
            kind_map: HashMap::new(),
        }
    }

    pub fn add_channel<C: Channel>(&mut self, settings: ChannelSettings) {
        let channel_kind = ChannelKind::of::<C>();
        self.kind_map
            .insert(channel_kind, (settings, std::any::type_name::<C>()));
    }

    pub fn channels(&self) -> impl Iterator<Item = (ChannelKind, ChannelSettings)> + '_ {
        self.kind_map
            .iter()
            .map(|(kind, (settings, _))| (*kind, *settings))
    }

    pub fn kind_to_name(&self, channel_kind: &ChannelKind) -> Result<&'static str, ChannelError> {
        self.kind_map
            .get(channel_kind)
            .map(|(_, name)| *name)
            .ok_or(ChannelError::ChannelKindNotFound)
    }
}

impl Default for ChannelKinds {
    fn default() -> Self {
        Self::new()
    }
}

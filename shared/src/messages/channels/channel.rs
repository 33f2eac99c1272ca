use crate::types::HostType;

/// Marker trait for Channel types registered with a Protocol
pub trait Channel: Send + Sync + 'static {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelDirection {
    ClientToServer,
    ServerToClient,
    Bidirectional,
}

/// Every relay in this protocol requests guaranteed, ordered-per-channel
/// delivery; the transport underneath is trusted to provide the guarantee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelMode {
    OrderedReliable,
}

#[derive(Clone, Copy, Debug)]
pub struct ChannelSettings {
    pub mode: ChannelMode,
    pub direction: ChannelDirection,
}

impl ChannelSettings {
    pub fn new(mode: ChannelMode, direction: ChannelDirection) -> Self {
        Self { mode, direction }
    }

    pub fn can_send_to_server(&self) -> bool {
        matches!(
            self.direction,
            ChannelDirection::ClientToServer | ChannelDirection::Bidirectional
        )
    }

    pub fn can_send_to_client(&self) -> bool {
        matches!(
            self.direction,
            ChannelDirection::ServerToClient | ChannelDirection::Bidirectional
        )
    }

    pub fn can_send_from(&self, host_type: HostType) -> bool {
        match host_type {
            HostType::Server => self.can_send_to_client(),
            HostType::Client => self.can_send_to_server(),
        }
    }
}

use crate::{
    messages::channels::channel::{Channel, ChannelDirection, ChannelMode},
    protocol::{Protocol, ProtocolPlugin},
};

/// Carries client-issued remote calls (damage/heal requests) to the authority
pub struct RequestChannel;
impl Channel for RequestChannel {}

/// Carries authority-issued replication updates and notices to observers
pub struct BroadcastChannel;
impl Channel for BroadcastChannel {}

pub struct DefaultChannelsPlugin;

impl ProtocolPlugin for DefaultChannelsPlugin {
    fn build(&self, protocol: &mut Protocol) {
        protocol
            .add_channel::<RequestChannel>(
                ChannelDirection::ClientToServer,
                ChannelMode::OrderedReliable,
            )
            .add_channel::<BroadcastChannel>(
                ChannelDirection::ServerToClient,
                ChannelMode::OrderedReliable,
            );
    }
}

use crate::{
    messages::channels::default_channels::DefaultChannelsPlugin,
    protocol::{Protocol, ProtocolPlugin},
    vitals::messages::{
        CharacterAssigned, CharacterDespawned, CharacterSpawned, DamageRequest, DefeatedNotice,
        HealRequest, HealthUpdate,
    },
};

/// Registers the default channels plus every message of the health relay
pub struct VitalProtocolPlugin;

impl ProtocolPlugin for VitalProtocolPlugin {
    fn build(&self, protocol: &mut Protocol) {
        protocol.add_plugin(DefaultChannelsPlugin);
        protocol
            .add_message::<DamageRequest>()
            .add_message::<HealRequest>()
            .add_message::<HealthUpdate>()
            .add_message::<DefeatedNotice>()
            .add_message::<CharacterSpawned>()
            .add_message::<CharacterDespawned>()
            .add_message::<CharacterAssigned>();
    }
}

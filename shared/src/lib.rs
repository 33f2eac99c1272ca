//! # Vital Shared
//! Common functionality shared between vital-server & vital-client crates:
//! the protocol registry, channel/message relay plumbing, and the
//! authoritative health ledger replicated between them.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod bigmap;
mod key_generator;
mod messages;
mod protocol;
mod replication;
mod types;
mod vitals;
mod wrapping_number;

pub mod transport;

pub use messages::{
    channels::{
        channel::{Channel, ChannelDirection, ChannelMode, ChannelSettings},
        channel_kinds::{ChannelKind, ChannelKinds},
        default_channels::{BroadcastChannel, DefaultChannelsPlugin, RequestChannel},
        receivers::{
            channel_receiver::{ChannelReceiver, MessageChannelReceiver},
            error::ReceiverError,
            ordered_reliable_receiver::OrderedReliableReceiver,
        },
        senders::{
            channel_sender::{ChannelSender, MessageChannelSender},
            reliable_sender::ReliableSender,
        },
    },
    error::{ChannelError, MessageManagerError},
    message::{Message, Named},
    message_container::MessageContainer,
    message_kinds::{MessageKind, MessageKinds},
    message_manager::MessageManager,
};
pub use replication::{
    diff_handler::GlobalDiffHandler,
    diff_mask::DiffMask,
    property::{Property, PropertyError},
    property_mutate::{PropertyMutate, PropertyMutator},
};
pub use vitals::{
    error::HealthError,
    messages::{
        CharacterAssigned, CharacterDespawned, CharacterSpawned, DamageRequest, DefeatedNotice,
        HealRequest, HealthUpdate,
    },
    plugin::VitalProtocolPlugin,
    record::{HealthOutcome, HealthRecord},
    CharacterKey, Vitality,
};

pub use transport::{Packet, PacketReceiver, PacketSender, TransportError};

pub use bigmap::{BigMap, BigMapKey};
pub use key_generator::KeyGenerator;
pub use protocol::{Protocol, ProtocolError, ProtocolPlugin};
pub use types::{HostType, MessageIndex};
pub use wrapping_number::{
    sequence_greater_than, sequence_less_than, try_wrapping_diff, wrapping_diff,
    WrappingNumberError,
};

//! # Vital Server
//! The authoritative host for the replicated health ledger. Clients relay
//! damage/heal requests here; the server validates and executes them, then
//! replicates the resulting health values back out to every connection.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use vital_shared::{
        BigMap, BigMapKey, BroadcastChannel, Channel, ChannelKind, HealthOutcome,
        HealthRecord, Message, MessageContainer, MessageKind, Protocol, RequestChannel, Vitality,
    };
}

mod connection;
mod error;
mod events;
mod server;
mod user;

pub use error::VitalServerError;
pub use events::{
    ConnectEvent, DefeatEvent, DisconnectEvent, ErrorEvent, Event, Events, HealthChangeEvent,
    LoopbackMessageEvent, MessageEvent,
};
pub use server::{Server, ServerConfig};
pub use user::{User, UserKey};

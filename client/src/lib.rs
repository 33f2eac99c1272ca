//! # Vital Client
//! A client that relays damage/heal requests to the authoritative server
//! and keeps a local replica of the replicated health ledger in sync. The
//! replica is read-only: only replication updates from the server may
//! change it.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use vital_shared::{
        BigMap, BigMapKey, BroadcastChannel, Channel, ChannelKind, HealthRecord, Message,
        MessageContainer, MessageKind, Protocol, RequestChannel, Vitality,
    };
}

mod client;
mod connection;
mod error;
mod events;

pub use client::Client;
pub use error::VitalClientError;
pub use events::{
    AssignCharacterEvent, ConnectEvent, DefeatEvent, DespawnCharacterEvent, ErrorEvent, Event,
    Events, MessageEvent, SpawnCharacterEvent, UpdateHealthEvent,
};

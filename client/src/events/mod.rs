mod events;

pub use events::{
    AssignCharacterEvent, ConnectEvent, DefeatEvent, DespawnCharacterEvent, ErrorEvent, Event,
    Events, MessageEvent, SpawnCharacterEvent, UpdateHealthEvent,
};

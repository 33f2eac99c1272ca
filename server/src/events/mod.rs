mod events;

pub use events::{
    ConnectEvent, DefeatEvent, DisconnectEvent, ErrorEvent, Event, Events, HealthChangeEvent,
    LoopbackMessageEvent, MessageEvent,
};

use std::any::Any;

use crate::{
    impl_message,
    messages::{message::Message, message::Named, message_kinds::MessageKind},
    vitals::CharacterKey,
};

fn valid_amount(amount: f32) -> bool {
    amount.is_finite() && amount >= 0.0
}

/// Client -> Authority: request that `amount` damage be applied.
/// Fails validation (and is silently dropped) for negative or non-finite
/// amounts, on the sender before the relay and on the authority before
/// execution.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageRequest {
    pub character: CharacterKey,
    pub amount: f32,
}

impl DamageRequest {
    pub fn new(character: CharacterKey, amount: f32) -> Self {
        Self { character, amount }
    }
}

impl Named for DamageRequest {
    fn name(&self) -> String {
        "DamageRequest".to_string()
    }
}

impl Message for DamageRequest {
    fn kind(&self) -> MessageKind {
        MessageKind::of::<DamageRequest>()
    }

    fn to_boxed_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_box(&self) -> Box<dyn Message> {
        Box::new(self.clone())
    }

    fn validate(&self) -> bool {
        valid_amount(self.amount)
    }
}

/// Client -> Authority: request that `amount` health be restored.
/// Same validation rule as [`DamageRequest`].
#[derive(Clone, Debug, PartialEq)]
pub struct HealRequest {
    pub character: CharacterKey,
    pub amount: f32,
}

impl HealRequest {
    pub fn new(character: CharacterKey, amount: f32) -> Self {
        Self { character, amount }
    }
}

impl Named for HealRequest {
    fn name(&self) -> String {
        "HealRequest".to_string()
    }
}

impl Message for HealRequest {
    fn kind(&self) -> MessageKind {
        MessageKind::of::<HealRequest>()
    }

    fn to_boxed_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_box(&self) -> Box<dyn Message> {
        Box::new(self.clone())
    }

    fn validate(&self) -> bool {
        valid_amount(self.amount)
    }
}

/// Authority -> All: replication update carrying the new current health
#[derive(Clone, Debug, PartialEq)]
pub struct HealthUpdate {
    pub character: CharacterKey,
    pub current_health: f32,
}

impl HealthUpdate {
    pub fn new(character: CharacterKey, current_health: f32) -> Self {
        Self {
            character,
            current_health,
        }
    }
}
impl_message!(HealthUpdate);

/// Authority -> All: the character crossed from Alive to Defeated
#[derive(Clone, Debug, PartialEq)]
pub struct DefeatedNotice {
    pub character: CharacterKey,
}

impl DefeatedNotice {
    pub fn new(character: CharacterKey) -> Self {
        Self { character }
    }
}
impl_message!(DefeatedNotice);

/// Authority -> All: a character entered the world at full health
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterSpawned {
    pub character: CharacterKey,
    pub max_health: f32,
    pub current_health: f32,
}

impl CharacterSpawned {
    pub fn new(character: CharacterKey, max_health: f32, current_health: f32) -> Self {
        Self {
            character,
            max_health,
            current_health,
        }
    }
}
impl_message!(CharacterSpawned);

/// Authority -> All: the character instance was discarded
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterDespawned {
    pub character: CharacterKey,
}

impl CharacterDespawned {
    pub fn new(character: CharacterKey) -> Self {
        Self { character }
    }
}
impl_message!(CharacterDespawned);

/// Authority -> One: sent only to the peer that owns the character
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterAssigned {
    pub character: CharacterKey,
}

impl CharacterAssigned {
    pub fn new(character: CharacterKey) -> Self {
        Self { character }
    }
}
impl_message!(CharacterAssigned);

use std::any::Any;

use crate::messages::{message::Message, message_kinds::MessageKind};

/// Type-erased carrier for a Message travelling through channel senders,
/// receivers, and the transport seam.
pub struct MessageContainer {
    inner: Box<dyn Message>,
}

impl MessageContainer {
    pub fn from_message(inner: Box<dyn Message>) -> Self {
        Self { inner }
    }

    pub fn name(&self) -> String {
        self.inner.name()
    }

    pub fn kind(&self) -> MessageKind {
        self.inner.kind()
    }

    /// Runs the message's pre-execution validation hook
    pub fn validate(&self) -> bool {
        self.inner.validate()
    }

    pub fn to_boxed_any(self) -> Box<dyn Any> {
        self.inner.to_boxed_any()
    }
}

impl Clone for MessageContainer {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_box(),
        }
    }
}

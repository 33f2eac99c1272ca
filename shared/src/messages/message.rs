use std::any::Any;

use crate::messages::message_kinds::MessageKind;

pub trait Named {
    /// Gets the String representation of the Type of the Message
    fn name(&self) -> String;
}

/// A struct that can be relayed between hosts over a registered channel.
///
/// `validate` is the pre-execution validation hook for remote calls: it runs
/// on the sending host before the relay and again on the receiving host
/// before the message is surfaced. A message failing validation is silently
/// dropped, mirroring the engine convention the relay pattern comes from.
pub trait Message: Named + Send + Sync + 'static {
    /// Gets the MessageKind of this type
    fn kind(&self) -> MessageKind;
    /// Returns self as a Box<dyn Any>
    fn to_boxed_any(self: Box<Self>) -> Box<dyn Any>;
    /// Returns a clone of self in a new Box
    fn clone_box(&self) -> Box<dyn Message>;
    /// Pre-execution validation hook, true by default
    fn validate(&self) -> bool {
        true
    }
}

/// Implements Named + the boilerplate portion of Message for a concrete
/// message type. Types that override `validate` implement Message by hand.
#[macro_export]
macro_rules! impl_message {
    ($message:ty) => {
        impl $crate::Named for $message {
            fn name(&self) -> String {
                stringify!($message).to_string()
            }
        }

        impl $crate::Message for $message {
            fn kind(&self) -> $crate::MessageKind {
                $crate::MessageKind::of::<$message>()
            }

            fn to_boxed_any(self: Box<Self>) -> Box<dyn std::any::Any> {
                self
            }

            fn clone_box(&self) -> Box<dyn $crate::Message> {
                Box::new(self.clone())
            }
        }
    };
}

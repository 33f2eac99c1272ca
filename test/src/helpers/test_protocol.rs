/// Minimal test protocol for E2E testing
use vital_shared::{impl_message, Protocol, VitalProtocolPlugin};

/// A plain broadcast message, for exercising the message relay outside the
/// health ledger's own traffic
#[derive(Clone, Debug, PartialEq)]
pub struct Announcement {
    pub text: String,
}

impl Announcement {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl_message!(Announcement);

pub fn protocol() -> Protocol {
    Protocol::builder()
        .add_plugin(VitalProtocolPlugin)
        .add_message::<Announcement>()
        .build()
}

use std::default::Default;

/// Contains Config properties which will be used by the Server
#[derive(Clone)]
pub struct ServerConfig {
    /// Determines whether a broadcast is also delivered to the Server's own
    /// event queue, mirroring a multicast that includes the sending host
    pub multicast_loopback: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            multicast_loopback: false,
        }
    }
}

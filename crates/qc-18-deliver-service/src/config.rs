//! # Deliver Service Configuration
//!
//! Per-channel configuration of the seek requester.

use serde::{Deserialize, Serialize};

use crate::domain::{ChannelId, DeliverError, DEFAULT_EPOCH, DEFAULT_MSG_VERSION};

/// Deliver requester configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeliverConfig {
    /// Channel the requester seeks on.
    pub channel_id: String,

    /// Is TLS enabled for this node's deliver connections?
    ///
    /// Seek requests are bound to the client certificate only when this is
    /// set and the server also demands client authentication.
    pub tls_enabled: bool,

    /// Message format version written into every channel header.
    pub msg_version: i32,

    /// Epoch written into every channel header.
    // TODO: source msg_version/epoch from the channel config once the
    // orderer side starts checking them.
    pub epoch: u64,
}

impl Default for DeliverConfig {
    fn default() -> Self {
        Self {
            channel_id: String::new(),
            tls_enabled: true,
            msg_version: DEFAULT_MSG_VERSION,
            epoch: DEFAULT_EPOCH,
        }
    }
}

impl DeliverConfig {
    /// Default configuration for `channel_id`.
    pub fn for_channel(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            ..Self::default()
        }
    }

    /// Create a config for testing (TLS disabled).
    pub fn for_testing() -> Self {
        Self {
            channel_id: "testchannel".to_string(),
            tls_enabled: false,
            ..Self::default()
        }
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), DeliverError> {
        if self.channel_id.trim().is_empty() {
            return Err(DeliverError::InvalidConfig(
                "channel_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Channel id as a domain value.
    pub fn channel(&self) -> ChannelId {
        ChannelId::new(self.channel_id.clone())
    }
}

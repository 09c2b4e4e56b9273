//! # Domain Value Objects
//!
//! Immutable wire types for the deliver seek protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::{EnvelopeError, Hash};

/// Size of the random nonce carried in every signature header.
pub const NONCE_SIZE: usize = 24;

/// Identifier of the ledger/chain a deliver stream belongs to.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChannelId(String);

impl ChannelId {
    /// Create a channel id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where in the remote log a seek starts or stops.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SeekPosition {
    /// The first block the source still has.
    Oldest,
    /// Exactly this block number.
    Specified(u64),
}

/// What the source does when the requested block does not exist yet.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SeekBehavior {
    /// Hold the request open until the block is committed.
    BlockUntilReady,
    /// Reply with an error right away.
    FailIfNotReady,
}

/// What each streamed item contains.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SeekContentType {
    /// Complete blocks.
    Block,
    /// Block headers with their signatures, no transaction data.
    HeaderWithSig,
}

/// Seek request body.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeekInfo {
    /// First block to deliver.
    pub start: SeekPosition,
    /// Last block to deliver.
    pub stop: SeekPosition,
    /// Behavior for blocks not yet available.
    pub behavior: SeekBehavior,
    /// Item content.
    pub content_type: SeekContentType,
}

/// Message kind carried in the channel header.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HeaderType {
    /// Seek request on a deliver stream.
    DeliverSeekInfo,
}

impl HeaderType {
    /// Numeric code of the kind on the wire.
    pub fn code(&self) -> i32 {
        match self {
            HeaderType::DeliverSeekInfo => 5,
        }
    }
}

/// Channel-scoped part of a message header.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelHeader {
    /// Message kind.
    pub header_type: HeaderType,
    /// Message format version.
    pub version: i32,
    /// Creation time, seconds since the unix epoch.
    pub timestamp: u64,
    /// Addressed channel.
    pub channel_id: ChannelId,
    /// Epoch the message was generated in.
    pub epoch: u64,
    /// SHA-256 of the client TLS certificate when the session uses mutual TLS.
    pub tls_cert_hash: Option<Hash>,
}

/// Creator part of a message header.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Serialized identity of the signer.
    pub creator: Vec<u8>,
    /// Random bytes, used once.
    pub nonce: [u8; NONCE_SIZE],
}

/// Full message header.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    /// Channel-scoped header.
    pub channel_header: ChannelHeader,
    /// Creator header.
    pub signature_header: SignatureHeader,
}

/// Signed part of an envelope.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payload {
    /// Message header.
    pub header: Header,
    /// Encoded message body.
    pub data: Vec<u8>,
}

/// Signed message as it goes over the wire.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    /// Encoded `Payload`.
    pub payload: Vec<u8>,
    /// Signature over `payload`.
    pub signature: Vec<u8>,
}

impl Envelope {
    /// Decode the payload and the seek info it carries.
    pub fn open(&self) -> Result<(Payload, SeekInfo), EnvelopeError> {
        let payload: Payload = bincode::deserialize(&self.payload)?;
        let seek_info: SeekInfo = bincode::deserialize(&payload.data)?;
        Ok((payload, seek_info))
    }
}

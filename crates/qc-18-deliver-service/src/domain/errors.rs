//! # Domain Errors
//!
//! Error types for the Deliver Service.
//!
//! Port errors (`LedgerError`, `SignerError`, `TransportError`) are produced by
//! collaborators and are carried unchanged inside `DeliverError`, which adds
//! the channel and the phase that failed.

use thiserror::Error;

use super::value_objects::ChannelId;

/// SHA-256 digest type alias.
pub type Hash = [u8; 32];

/// Errors reported by a `LedgerInfo` collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The committer could not be reached.
    #[error("Committer unavailable: {0}")]
    Unavailable(String),

    /// Local storage failed while reading the height.
    #[error("Ledger storage error: {0}")]
    Storage(String),
}

/// Errors reported by a `Signer` collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignerError {
    /// Key material is not loaded or not accessible.
    #[error("Signing key unavailable: {0}")]
    KeyUnavailable(String),

    /// The signing primitive itself failed.
    #[error("Signing failed: {0}")]
    Failed(String),
}

/// Errors reported by a `BlocksDeliverer` collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The deliver stream is gone (torn down or never established).
    #[error("Deliver stream closed")]
    StreamClosed,

    /// Sending failed for another transport reason.
    #[error("Send failed: {0}")]
    SendFailed(String),
}

/// Errors while building a signed envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// A header, the payload or the seek info could not be encoded.
    #[error("Encoding failed: {0}")]
    Encoding(#[from] bincode::Error),

    /// The signer refused or failed to sign the payload.
    #[error(transparent)]
    Signing(#[from] SignerError),
}

/// Phase of a resumption attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestPhase {
    /// Reading the local ledger height.
    HeightQuery,
    /// Building and signing the seek envelope.
    Signing,
    /// Handing the envelope to the transport.
    Send,
}

/// Deliver Service error types.
#[derive(Debug, Error)]
pub enum DeliverError {
    /// The ledger height could not be obtained; nothing was built or sent.
    #[error("Can't get ledger height for channel {channel}: {source}")]
    HeightQuery {
        /// Channel of the attempt
        channel: ChannelId,
        /// Error from the ledger collaborator
        #[source]
        source: LedgerError,
    },

    /// The seek envelope could not be produced; nothing was sent.
    #[error("Failed creating seek envelope for channel {channel}: {source}")]
    Signing {
        /// Channel of the attempt
        channel: ChannelId,
        /// Encoding or signer failure
        #[source]
        source: EnvelopeError,
    },

    /// The transport rejected the envelope.
    #[error("Failed sending seek envelope for channel {channel}: {source}")]
    TransportSend {
        /// Channel of the attempt
        channel: ChannelId,
        /// Error from the transport collaborator
        #[source]
        source: TransportError,
    },

    /// Configuration is unusable.
    #[error("Invalid deliver configuration: {0}")]
    InvalidConfig(String),
}

impl DeliverError {
    /// Phase in which the attempt failed, `None` for configuration errors.
    pub fn phase(&self) -> Option<RequestPhase> {
        match self {
            DeliverError::HeightQuery { .. } => Some(RequestPhase::HeightQuery),
            DeliverError::Signing { .. } => Some(RequestPhase::Signing),
            DeliverError::TransportSend { .. } => Some(RequestPhase::Send),
            DeliverError::InvalidConfig(_) => None,
        }
    }

    /// Channel the failed attempt belonged to.
    pub fn channel(&self) -> Option<&ChannelId> {
        match self {
            DeliverError::HeightQuery { channel, .. }
            | DeliverError::Signing { channel, .. }
            | DeliverError::TransportSend { channel, .. } => Some(channel),
            DeliverError::InvalidConfig(_) => None,
        }
    }
}

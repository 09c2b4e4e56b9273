//! # Outbound Ports
//!
//! Capabilities the Deliver Service consumes: ledger height, signing identity,
//! TLS session material and the deliver stream.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Envelope, LedgerError, SignerError, TransportError};

/// Ledger information - outbound port.
#[async_trait]
pub trait LedgerInfo: Send + Sync {
    /// Number of blocks committed locally.
    async fn ledger_height(&self) -> Result<u64, LedgerError>;
}

/// Signing identity - outbound port.
pub trait Signer: Send + Sync {
    /// Serialized identity placed in the signature header.
    fn identity(&self) -> Vec<u8>;

    /// Sign `message`.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError>;
}

/// Client side of the TLS session - outbound port.
pub trait TlsClient: Send + Sync {
    /// Does the server require a client certificate?
    fn mutual_tls_required(&self) -> bool;

    /// DER bytes of the client's leaf certificate.
    fn leaf_certificate(&self) -> &[u8];
}

/// Deliver stream - outbound port.
#[async_trait]
pub trait BlocksDeliverer: Send + Sync {
    /// Send an envelope over the established stream.
    async fn send(&self, envelope: Envelope) -> Result<(), TransportError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock ledger for testing.
#[derive(Clone, Debug, Default)]
pub struct MockLedger {
    /// Reported height.
    pub height: u64,
    /// Error to return instead of the height.
    pub error: Option<LedgerError>,
}

impl MockLedger {
    /// Ledger reporting `height`.
    pub fn at_height(height: u64) -> Self {
        Self {
            height,
            error: None,
        }
    }

    /// Ledger failing with `error`.
    pub fn failing(error: LedgerError) -> Self {
        Self {
            height: 0,
            error: Some(error),
        }
    }
}

#[async_trait]
impl LedgerInfo for MockLedger {
    async fn ledger_height(&self) -> Result<u64, LedgerError> {
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(self.height),
        }
    }
}

/// Mock signer for testing.
///
/// The "signature" is the message prefixed with the identity, so tests can
/// check exactly which bytes were signed.
#[derive(Clone, Debug)]
pub struct MockSigner {
    /// Identity bytes.
    pub identity: Vec<u8>,
    /// Error to return instead of signing.
    pub error: Option<SignerError>,
}

impl Default for MockSigner {
    fn default() -> Self {
        Self {
            identity: b"mock-signer".to_vec(),
            error: None,
        }
    }
}

impl Signer for MockSigner {
    fn identity(&self) -> Vec<u8> {
        self.identity.clone()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        if let Some(e) = &self.error {
            return Err(e.clone());
        }
        let mut signature = self.identity.clone();
        signature.extend_from_slice(message);
        Ok(signature)
    }
}

/// Deliverer recording every envelope it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingDeliverer {
    sent: Mutex<Vec<Envelope>>,
    /// Error to return; the envelope is still recorded as an attempt.
    pub error: Option<TransportError>,
}

impl RecordingDeliverer {
    /// Deliverer whose sends fail with `error`.
    pub fn failing(error: TransportError) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            error: Some(error),
        }
    }

    /// Number of send attempts so far.
    pub fn send_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// Envelopes passed to `send`, in order.
    pub fn sent(&self) -> Vec<Envelope> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl BlocksDeliverer for RecordingDeliverer {
    async fn send(&self, envelope: Envelope) -> Result<(), TransportError> {
        self.sent.lock().push(envelope);
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

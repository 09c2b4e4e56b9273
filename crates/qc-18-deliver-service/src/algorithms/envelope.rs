//! # Signed Envelopes
//!
//! Wraps a message body into a signed envelope addressed to a channel and,
//! when the session uses mutual TLS, bound to the client certificate.
//!
//! ## Layout
//!
//! ```text
//! Envelope
//! ├── payload   = encode(Payload)
//! │   ├── header
//! │   │   ├── channel_header   { kind, version, timestamp, channel, epoch, tls_cert_hash }
//! │   │   └── signature_header { creator, nonce }
//! │   └── data  = encode(body)
//! └── signature = signer.sign(payload)
//! ```

use rand::RngCore;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::{
    ChannelHeader, ChannelId, Envelope, EnvelopeError, Hash, Header, HeaderType, Payload,
    SignatureHeader, NONCE_SIZE,
};
use crate::ports::{Signer, TlsClient};

/// SHA-256 of `data`.
pub fn compute_sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Hash of the client certificate to bind a message to the TLS session.
///
/// Present only when TLS is enabled for this node and the server requires
/// client certificates; a certificate the server never checks binds nothing.
pub fn tls_cert_hash<T: TlsClient + ?Sized>(tls_enabled: bool, tls: &T) -> Option<Hash> {
    if tls_enabled && tls.mutual_tls_required() {
        Some(compute_sha256(tls.leaf_certificate()))
    } else {
        None
    }
}

/// Fresh random nonce for a signature header.
pub fn new_nonce() -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce);
    nonce
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Create a signed envelope carrying `data`, optionally bound to a TLS session.
///
/// Fails without producing anything if encoding or signing fails.
pub fn create_signed_envelope_with_tls_binding<S, T>(
    header_type: HeaderType,
    channel_id: &ChannelId,
    signer: &S,
    data: &T,
    msg_version: i32,
    epoch: u64,
    tls_cert_hash: Option<Hash>,
) -> Result<Envelope, EnvelopeError>
where
    S: Signer + ?Sized,
    T: Serialize,
{
    let channel_header = ChannelHeader {
        header_type,
        version: msg_version,
        timestamp: unix_timestamp(),
        channel_id: channel_id.clone(),
        epoch,
        tls_cert_hash,
    };
    let signature_header = SignatureHeader {
        creator: signer.identity(),
        nonce: new_nonce(),
    };

    let payload = Payload {
        header: Header {
            channel_header,
            signature_header,
        },
        data: bincode::serialize(data)?,
    };
    let payload = bincode::serialize(&payload)?;
    let signature = signer.sign(&payload)?;

    Ok(Envelope { payload, signature })
}

//! # QC-18 Deliver Service
//!
//! Seek request resumption for block delivery.
//!
//! **Subsystem ID:** 18
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! After startup, reconnect or failure, a replica re-opens its deliver stream
//! by sending one signed seek request. This crate decides where that request
//! starts, makes it open-ended, signs it and binds it to the TLS session:
//!
//! | Ledger height | Start | Stop | Behavior |
//! |---------------|-------|------|----------|
//! | 0 | Oldest | `u64::MAX` | Block until ready |
//! | N > 0 | Block N | `u64::MAX` | Block until ready |
//!
//! Because the stop is unbounded and the source waits for missing blocks,
//! catch-up and live tailing happen on the same stream.
//!
//! ## Security
//!
//! | Defense | Description |
//! |---------|-------------|
//! | Signed requests | Every seek is signed by the node identity |
//! | TLS channel binding | SHA-256 of the client certificate in the header when mutual TLS is on |
//! | Fresh nonce | 24 random bytes per request |
//!
//! ## Module Structure
//!
//! ```text
//! qc-18-deliver-service/
//! ├── domain/          # Seek and envelope types, errors, invariants
//! ├── algorithms/      # Start decision, seek boundaries, envelope signing
//! ├── ports/           # API traits (inbound) + dependency traits (outbound)
//! ├── adapters/        # Ed25519 signer, TLS material, channel deliverer
//! ├── application/     # BlocksRequester orchestrating everything
//! └── config.rs        # DeliverConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{ChannelDeliverer, Ed25519Signer, SignerIdentity, StaticTlsClient};
pub use algorithms::{
    build_seek_info, compute_sha256, create_signed_envelope_with_tls_binding, decide_start,
    new_nonce, tls_cert_hash,
};
pub use application::BlocksRequester;
pub use config::DeliverConfig;
pub use domain::{
    ChannelHeader, ChannelId, DeliverError, Envelope, EnvelopeError, Hash, Header, HeaderType,
    LedgerError, Payload, RequestPhase, SeekBehavior, SeekContentType, SeekInfo, SeekPosition,
    SignatureHeader, SignerError, TransportError, MAX_SEEK_NUMBER, NONCE_SIZE,
    invariant_block_until_ready, invariant_open_ended, invariant_start_matches_height,
};
pub use ports::{
    BlocksDeliverer, DeliverRequesterApi, LedgerInfo, MockLedger, MockSigner,
    RecordingDeliverer, Signer, TlsClient,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for the Deliver Service.

mod deliverer;
mod signer;
mod tls;

pub use deliverer::ChannelDeliverer;
pub use signer::{Ed25519Signer, SignerIdentity};
pub use tls::StaticTlsClient;

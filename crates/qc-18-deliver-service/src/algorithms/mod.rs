//! # Algorithms Module
//!
//! Seek boundary decisions and envelope signing.

pub mod envelope;
pub mod seek;

pub use envelope::{compute_sha256, create_signed_envelope_with_tls_binding, new_nonce, tls_cert_hash};
pub use seek::{build_seek_info, decide_start};

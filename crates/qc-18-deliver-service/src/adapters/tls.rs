//! Static TLS Adapter
//!
//! Implements `TlsClient` from the client certificate and the server's
//! client-auth setting captured when the deliver connection was dialed.

use crate::ports::outbound::TlsClient;

/// TLS material of an established client connection.
#[derive(Clone, Debug)]
pub struct StaticTlsClient {
    leaf_certificate: Vec<u8>,
    mutual_tls_required: bool,
}

impl StaticTlsClient {
    /// Connection whose server requires `leaf_certificate` as client auth.
    pub fn mutual(leaf_certificate: Vec<u8>) -> Self {
        Self {
            leaf_certificate,
            mutual_tls_required: true,
        }
    }

    /// Connection without client authentication.
    pub fn server_only() -> Self {
        Self {
            leaf_certificate: Vec::new(),
            mutual_tls_required: false,
        }
    }
}

impl TlsClient for StaticTlsClient {
    fn mutual_tls_required(&self) -> bool {
        self.mutual_tls_required
    }

    fn leaf_certificate(&self) -> &[u8] {
        &self.leaf_certificate
    }
}

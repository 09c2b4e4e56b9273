//! Ed25519 Signer Adapter
//!
//! Implements the `Signer` port with an in-process Ed25519 key.

use ed25519_dalek::{Signature, Signer as _, SigningKey, Verifier as _, VerifyingKey};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::SignerError;
use crate::ports::outbound::Signer;

/// Identity placed in the signature header of every request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignerIdentity {
    /// Membership provider the key belongs to.
    pub msp_id: String,
    /// Ed25519 public key.
    pub public_key: [u8; 32],
}

impl SignerIdentity {
    /// Decode an identity from signature header bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, SignerError> {
        bincode::deserialize(bytes).map_err(|e| SignerError::Failed(e.to_string()))
    }

    /// Verify `signature` over `message` against this identity's key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), SignerError> {
        let key = VerifyingKey::from_bytes(&self.public_key)
            .map_err(|e| SignerError::Failed(e.to_string()))?;
        let signature =
            Signature::from_slice(signature).map_err(|e| SignerError::Failed(e.to_string()))?;
        key.verify(message, &signature)
            .map_err(|e| SignerError::Failed(e.to_string()))
    }
}

/// Ed25519 signer.
pub struct Ed25519Signer {
    key: SigningKey,
    identity: SignerIdentity,
    /// Encoded identity, computed once.
    encoded: Vec<u8>,
}

impl Ed25519Signer {
    /// Create a signer from a 32-byte secret seed.
    pub fn from_seed(msp_id: impl Into<String>, seed: [u8; 32]) -> Result<Self, SignerError> {
        let key = SigningKey::from_bytes(&seed);
        let identity = SignerIdentity {
            msp_id: msp_id.into(),
            public_key: key.verifying_key().to_bytes(),
        };
        let encoded = bincode::serialize(&identity)
            .map_err(|e| SignerError::KeyUnavailable(e.to_string()))?;
        Ok(Self {
            key,
            identity,
            encoded,
        })
    }

    /// Create a signer with a random key.
    pub fn generate(msp_id: impl Into<String>) -> Result<Self, SignerError> {
        Self::from_seed(msp_id, rand::random())
    }

    /// Identity of this signer.
    pub fn signer_identity(&self) -> &SignerIdentity {
        &self.identity
    }
}

impl Signer for Ed25519Signer {
    fn identity(&self) -> Vec<u8> {
        self.encoded.clone()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        self.key
            .try_sign(message)
            .map(|sig| sig.to_bytes().to_vec())
            .map_err(|e| {
                warn!("[qc-18] Ed25519 signing failed for {}: {}", self.identity.msp_id, e);
                SignerError::Failed(e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_roundtrips_through_header_bytes() {
        let signer = Ed25519Signer::from_seed("Org1MSP", [7u8; 32]).unwrap();
        let decoded = SignerIdentity::decode(&signer.identity()).unwrap();
        assert_eq!(&decoded, signer.signer_identity());
        assert_eq!(decoded.msp_id, "Org1MSP");
    }

    #[test]
    fn test_sign_verify() {
        let signer = Ed25519Signer::generate("Org1MSP").unwrap();
        let sig = signer.sign(b"seek").unwrap();
        assert_eq!(sig.len(), 64);
        assert!(signer.signer_identity().verify(b"seek", &sig).is_ok());
        assert!(signer.signer_identity().verify(b"other", &sig).is_err());
    }

    #[test]
    fn test_same_seed_same_key() {
        let a = Ed25519Signer::from_seed("Org1MSP", [1u8; 32]).unwrap();
        let b = Ed25519Signer::from_seed("Org1MSP", [1u8; 32]).unwrap();
        assert_eq!(a.identity(), b.identity());
        assert_eq!(a.sign(b"m").unwrap(), b.sign(b"m").unwrap());
    }
}

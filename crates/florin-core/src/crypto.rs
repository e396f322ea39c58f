//! Ed25519 signing primitives for the Florin wallet engine.
//!
//! Provides key generation, detached payload signing, and signature
//! verification. Uses ed25519-dalek for the underlying Ed25519
//! implementation.
//!
//! # Key material layout
//!
//! Private key material is the 64-byte keypair form (32-byte seed followed
//! by the 32-byte public key), matching what the ledger's verifier expects
//! wallets to back up. Public keys travel as base64 text on the wire;
//! signatures are detached 64-byte values, also base64 on the wire.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use ed25519_dalek::{Signer, Verifier};
use std::fmt;

use crate::error::CryptoError;

/// Length of the combined private key material (seed + public key).
pub const KEYPAIR_BYTES: usize = 64;

/// Length of a detached Ed25519 signature.
pub const SIGNATURE_BYTES: usize = 64;

/// Ed25519 keypair for signing transaction payloads.
///
/// Wraps [`ed25519_dalek::SigningKey`]; the secret half is zeroized on drop
/// by the underlying library. Use [`KeyPair::generate`] for fresh wallets or
/// [`KeyPair::from_keypair_bytes`] when restoring decrypted key material.
pub struct KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

impl KeyPair {
    /// Generate a random keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Restore a keypair from the 64-byte seed+public form.
    ///
    /// Validates that the embedded public key matches the seed. Corrupted
    /// key material fails with [`CryptoError::InvalidKeyMaterial`].
    pub fn from_keypair_bytes(bytes: &[u8; KEYPAIR_BYTES]) -> Result<Self, CryptoError> {
        let signing_key = ed25519_dalek::SigningKey::from_keypair_bytes(bytes)
            .map_err(|_| CryptoError::InvalidKeyMaterial)?;
        Ok(Self { signing_key })
    }

    /// The 64-byte seed+public form. Handle with care.
    pub fn to_keypair_bytes(&self) -> [u8; KEYPAIR_BYTES] {
        self.signing_key.to_keypair_bytes()
    }

    /// Derive the public key from this keypair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            verifying_key: self.signing_key.verifying_key(),
        }
    }

    /// Sign a payload, returning the detached 64-byte Ed25519 signature.
    ///
    /// Ed25519 signing is deterministic: the same payload and key always
    /// produce the same signature.
    pub fn sign(&self, payload: &[u8]) -> [u8; SIGNATURE_BYTES] {
        self.signing_key.sign(payload).to_bytes()
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Ed25519 public key for verifying signatures and deriving wallet ids.
#[derive(Clone)]
pub struct PublicKey {
    verifying_key: ed25519_dalek::VerifyingKey,
}

impl PublicKey {
    /// Create a public key from raw bytes (32 bytes).
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let vk = ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self { verifying_key: vk })
    }

    /// Parse a public key from its base64 wire encoding.
    pub fn from_base64(text: &str) -> Result<Self, CryptoError> {
        let decoded = BASE64
            .decode(text)
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        let bytes: [u8; 32] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        Self::from_bytes(&bytes)
    }

    /// Get the raw public key bytes (32 bytes).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// The base64 wire encoding of this key.
    ///
    /// This exact text is what the ledger registers and what wallet-id
    /// derivation hashes; it must stay byte-for-byte stable.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.to_bytes())
    }

    /// Verify a detached Ed25519 signature over a payload.
    pub fn verify(&self, payload: &[u8], signature: &[u8; SIGNATURE_BYTES]) -> Result<(), CryptoError> {
        let sig = ed25519_dalek::Signature::from_bytes(signature);
        self.verifying_key
            .verify(payload, &sig)
            .map_err(|_| CryptoError::VerificationFailed)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_base64())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base64())
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PublicKey {}

/// Decode a base64 detached signature into its 64-byte form.
pub fn signature_from_base64(text: &str) -> Result<[u8; SIGNATURE_BYTES], CryptoError> {
    let decoded = BASE64
        .decode(text)
        .map_err(|_| CryptoError::InvalidSignature)?;
    decoded
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidSignature)
}

/// Encode a detached signature for the wire.
pub fn signature_to_base64(signature: &[u8; SIGNATURE_BYTES]) -> String {
    BASE64.encode(signature)
}

//! Error types for Florin core primitives.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid public key bytes")] InvalidPublicKey,
    #[error("invalid private key material")] InvalidKeyMaterial,
    #[error("invalid signature bytes")] InvalidSignature,
    #[error("signature verification failed")] VerificationFailed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletIdError {
    #[error("invalid length: {0} hex characters, expected 64")] InvalidLength(usize),
    #[error("invalid hex: {0}")] InvalidHex(String),
}

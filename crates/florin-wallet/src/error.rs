//! Wallet engine error types.
//!
//! Every variant is a typed outcome reported to the caller; none is fatal
//! to the process. `DecryptionFailed` and `NotFound` are expected user and
//! startup states, not system faults.

use florin_core::error::CryptoError;
use thiserror::Error;

/// Errors that can occur in wallet engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// Malformed caller-supplied arguments. Local and recoverable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Wrong passphrase or corrupted encrypted blob. Recoverable by retry.
    #[error("decryption failed: wrong passphrase or corrupted data")]
    DecryptionFailed,

    /// Selection cannot cover the target amount.
    #[error("insufficient funds: have {have}, need {need}")]
    InsufficientFunds {
        /// Total available in the snapshot, in minor units.
        have: u64,
        /// Required amount in minor units.
        need: u64,
    },

    /// Malformed key material; indicates storage corruption. The caller
    /// should prompt for re-generation or restore from backup.
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// No wallet in the store. Normal startup state, not a failure.
    #[error("no wallet found")]
    NotFound,

    /// Encryption primitive failure.
    #[error("encryption: {0}")]
    Encryption(String),

    /// I/O error from the key store.
    #[error("I/O error: {0}")]
    Io(String),

    /// Stored record could not be (de)serialized.
    #[error("serialization: {0}")]
    Serialization(String),
}

impl From<CryptoError> for WalletError {
    fn from(e: CryptoError) -> Self {
        WalletError::InvalidKey(e.to_string())
    }
}

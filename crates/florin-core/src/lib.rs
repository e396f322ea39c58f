//! # florin-core — primitives shared between wallet and verifier.
//!
//! Everything a remote verifier needs to recompute lives here: Ed25519
//! signing and verification, wallet-id derivation, the transaction data
//! model, and the ledger API contracts.
//!
//! # Modules
//!
//! - [`error`] — `CryptoError`, `WalletIdError`
//! - [`crypto`] — KeyPair, PublicKey, detached signatures
//! - [`wallet_id`] — SHA-256 wallet-id derivation
//! - [`types`] — SpendableOutput, TransactionDraft, SignedTransaction
//! - [`wire`] — ledger request/response contracts

pub mod crypto;
pub mod error;
pub mod types;
pub mod wallet_id;
pub mod wire;

// Re-exports for convenient access
pub use crypto::{KeyPair, PublicKey, signature_from_base64, signature_to_base64};
pub use error::{CryptoError, WalletIdError};
pub use types::{SignedTransaction, SpendableOutput, TransactionDraft};
pub use wallet_id::WalletId;

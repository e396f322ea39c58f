//! # florin-wallet — client-side wallet engine.
//!
//! Generates a signing keypair locally, derives the wallet id, encrypts
//! the private key at rest under a passphrase, selects spendable outputs
//! to fund a payment, builds the canonical payload, and produces the
//! detached signature the ledger verifies. The ledger itself, transport,
//! and UI are external collaborators.
//!
//! # Modules
//!
//! - [`error`] — `WalletError` enum
//! - [`vault`] — Argon2id + AES-256-GCM passphrase encryption
//! - [`keystore`] — slot-keyed encrypted key persistence
//! - [`unlock`] — scoped plaintext key access, wiped on drop
//! - [`selection`] — deterministic greedy output selection
//! - [`builder`] — draft construction and the canonical payload
//! - [`signer`] — detached signing and submission assembly
//! - [`wallet`] — high-level composition

pub mod builder;
pub mod error;
pub mod keystore;
pub mod selection;
pub mod signer;
pub mod unlock;
pub mod vault;
pub mod wallet;

// Re-exports for convenient access
pub use builder::{MAX_NOTE_LEN, TransactionBuilder, canonical_payload, current_timestamp};
pub use error::WalletError;
pub use keystore::{DEFAULT_SLOT, FileKeyStore, KeyStore, StoredWallet};
pub use selection::{OutputSelector, Selection};
pub use signer::TransactionSigner;
pub use unlock::UnlockSession;
pub use wallet::Wallet;

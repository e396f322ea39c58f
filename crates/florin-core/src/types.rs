//! Transaction data model for the Florin wallet engine.
//!
//! Amounts are integer minor units (no floating point). Wallet ids travel
//! as their lowercase-hex text and output ids are opaque strings owned by
//! the ledger, so both are plain `String`s here.

use serde::{Deserialize, Serialize};

/// A spendable output (UTXO) as reported by the ledger's balance query.
///
/// The engine only ever reads a snapshot of these; marking one spent is
/// the ledger's responsibility.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SpendableOutput {
    /// Opaque output identifier assigned by the ledger.
    pub id: String,
    /// Value in minor units.
    pub amount: u64,
    /// Whether the ledger has already seen this output spent.
    pub spent: bool,
}

/// An unsigned transaction, immutable once signed.
///
/// The field values here are exactly what the canonical payload is built
/// from; re-encoding any of them after signing desyncs the signature.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransactionDraft {
    /// Sender wallet id (lowercase hex).
    pub sender: String,
    /// Receiver wallet id.
    pub receiver: String,
    /// Amount in minor units.
    pub amount: u64,
    /// Free-text note, raw and unescaped.
    pub note: String,
    /// ISO-8601 instant with millisecond precision and `Z` suffix.
    pub timestamp: String,
    /// Ids of the outputs funding this payment, in selection order.
    pub inputs: Vec<String>,
}

/// A signed transaction ready for submission to the ledger.
///
/// Field names match the ledger's submission contract byte-for-byte.
/// The ledger recomputes the canonical payload from the draft fields and
/// verifies `signature` against `sender_public_key` before accepting.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
    pub note: String,
    pub timestamp: String,
    /// Base64 of the sender's 32-byte Ed25519 public key.
    pub sender_public_key: String,
    /// Base64 of the detached 64-byte Ed25519 signature.
    pub signature: String,
    pub inputs: Vec<String>,
}

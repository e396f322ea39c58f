//! Request/response contracts for the ledger API.
//!
//! The engine performs no transport itself; these serde types pin the
//! JSON shapes the remote ledger consumes and produces. A
//! [`SignedTransaction`](crate::types::SignedTransaction) is itself the
//! submission body.

use serde::{Deserialize, Serialize};

use crate::types::SpendableOutput;

/// Wallet registration request: the locally derived id travels alongside
/// the public key so the ledger can confirm the derivation matches.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RegisterWalletRequest {
    /// Base64 of the 32-byte Ed25519 public key.
    pub public_key: String,
    /// Locally derived wallet id (lowercase hex).
    pub wallet_id: String,
}

/// Registration response. The returned id must equal the locally derived
/// one; a mismatch means the integration is broken.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RegisterWalletResponse {
    pub wallet_id: String,
}

/// Balance/output snapshot returned by the ledger for a wallet id.
///
/// The snapshot does not reflect concurrent spends made elsewhere.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WalletSnapshot {
    /// Sum of unspent output amounts, in minor units.
    pub balance: u64,
    /// Outputs available to fund a payment.
    pub utxos: Vec<SpendableOutput>,
}

/// Acknowledgement for a submitted transaction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SubmitTransactionResponse {
    pub tx_id: String,
}

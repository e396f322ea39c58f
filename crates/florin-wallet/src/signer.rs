//! Detached signing and signed-transaction assembly.
//!
//! Signing is a pure cryptographic operation over the canonical payload;
//! it has no ledger-aware failure modes. Malformed key material is caught
//! earlier, when the key is parsed during unlock.

use florin_core::crypto::{KeyPair, PublicKey, SIGNATURE_BYTES, signature_to_base64};
use florin_core::types::{SignedTransaction, TransactionDraft};

/// Signs canonical payloads and assembles submission-ready transactions.
pub struct TransactionSigner;

impl TransactionSigner {
    /// Produce the detached 64-byte signature over a canonical payload.
    ///
    /// Deterministic per (payload, key) pair; repeated calls yield the
    /// identical signature.
    pub fn sign_payload(payload: &str, keypair: &KeyPair) -> [u8; SIGNATURE_BYTES] {
        keypair.sign(payload.as_bytes())
    }

    /// Assemble the terminal [`SignedTransaction`]. Pure, no I/O.
    pub fn into_signed(
        draft: TransactionDraft,
        signature: &[u8; SIGNATURE_BYTES],
        public_key: &PublicKey,
    ) -> SignedTransaction {
        SignedTransaction {
            sender: draft.sender,
            receiver: draft.receiver,
            amount: draft.amount,
            note: draft.note,
            timestamp: draft.timestamp,
            sender_public_key: public_key.to_base64(),
            signature: signature_to_base64(signature),
            inputs: draft.inputs,
        }
    }
}

//! Wallet composition: identity, unlock, and the send flow.
//!
//! A [`Wallet`] holds only public material and the opaque encrypted blob;
//! the plaintext private key exists solely inside the [`UnlockSession`]
//! scoped within a single operation.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::fmt;
use tracing::debug;
use zeroize::Zeroizing;

use florin_core::crypto::{KeyPair, PublicKey};
use florin_core::types::{SignedTransaction, SpendableOutput};
use florin_core::wallet_id::WalletId;
use florin_core::wire::RegisterWalletRequest;

use crate::builder::{TransactionBuilder, canonical_payload, current_timestamp};
use crate::error::WalletError;
use crate::keystore::StoredWallet;
use crate::signer::TransactionSigner;
use crate::unlock::UnlockSession;
use crate::vault;

/// A device wallet: public identity plus the encrypted private key.
pub struct Wallet {
    public_key: PublicKey,
    wallet_id: WalletId,
    encrypted_private_key: String,
}

impl Wallet {
    /// Generate a fresh wallet and encrypt its private key.
    ///
    /// Returns the wallet and the [`StoredWallet`] record to persist.
    /// Nothing is written here: encryption happens first, persistence is
    /// the caller's separate step, so a failed save stores no state.
    pub fn create(passphrase: &str) -> Result<(Self, StoredWallet), WalletError> {
        let keypair = KeyPair::generate();
        let public_key = keypair.public_key();
        let wallet_id = WalletId::derive(&public_key);

        let private_b64 = Zeroizing::new(BASE64.encode(keypair.to_keypair_bytes()));
        let encrypted_private_key = vault::encrypt(&private_b64, passphrase)?;
        // keypair and private_b64 drop (and zeroize) here

        let record = StoredWallet {
            public_key: public_key.to_base64(),
            encrypted_private_key: encrypted_private_key.clone(),
            wallet_id: wallet_id.to_string(),
            created_at: current_timestamp(),
        };

        debug!(wallet_id = %wallet_id, "created wallet");
        Ok((
            Self {
                public_key,
                wallet_id,
                encrypted_private_key,
            },
            record,
        ))
    }

    /// Rebuild a wallet from a stored record. No plaintext key involved.
    ///
    /// The stored wallet id must match the derivation from the stored
    /// public key; a mismatch means the record is corrupted.
    pub fn open(record: &StoredWallet) -> Result<Self, WalletError> {
        let public_key = PublicKey::from_base64(&record.public_key)?;
        let wallet_id = WalletId::derive(&public_key);
        if record.wallet_id != wallet_id.to_string() {
            return Err(WalletError::InvalidKey(
                "stored wallet id does not match public key".into(),
            ));
        }
        Ok(Self {
            public_key,
            wallet_id,
            encrypted_private_key: record.encrypted_private_key.clone(),
        })
    }

    /// The wallet's public, shareable identifier.
    pub fn wallet_id(&self) -> &WalletId {
        &self.wallet_id
    }

    /// The wallet's public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The registration request for the ledger. The id the ledger returns
    /// must equal [`Wallet::wallet_id`].
    pub fn registration(&self) -> RegisterWalletRequest {
        RegisterWalletRequest {
            public_key: self.public_key.to_base64(),
            wallet_id: self.wallet_id.to_string(),
        }
    }

    /// Sum of unspent outputs in a snapshot. Display helper only; the
    /// ledger's balance is authoritative.
    pub fn balance(&self, outputs: &[SpendableOutput]) -> u64 {
        outputs
            .iter()
            .filter(|o| !o.spent)
            .map(|o| o.amount)
            .fold(0u64, u64::saturating_add)
    }

    /// Unlock the private key for one signing operation.
    ///
    /// Verifies the decrypted key against the wallet's public key, so a
    /// record whose halves were swapped out from under each other is
    /// caught here instead of producing unverifiable signatures.
    pub fn unlock(&self, passphrase: &str) -> Result<UnlockSession, WalletError> {
        let session = UnlockSession::open(&self.encrypted_private_key, passphrase)?;
        if session.public_key() != self.public_key {
            return Err(WalletError::InvalidKey(
                "decrypted key does not match wallet public key".into(),
            ));
        }
        Ok(session)
    }

    /// The full send flow: unlock, select, build, sign.
    ///
    /// The unlock session lives only inside this call; every exit path,
    /// including validation and selection failures after the unlock,
    /// drops it and wipes the plaintext key.
    pub fn send(
        &self,
        passphrase: &str,
        outputs: &[SpendableOutput],
        receiver: &str,
        amount: u64,
        note: &str,
    ) -> Result<SignedTransaction, WalletError> {
        let session = self.unlock(passphrase)?;

        let mut builder = TransactionBuilder::new(self.wallet_id.to_string(), receiver, amount);
        builder.set_note(note);
        let draft = builder.build(outputs)?;

        let payload = canonical_payload(&draft);
        let signature = session.sign(payload.as_bytes());

        debug!(wallet_id = %self.wallet_id, amount, inputs = draft.inputs.len(), "signed transaction");
        Ok(TransactionSigner::into_signed(
            draft,
            &signature,
            &self.public_key,
        ))
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("wallet_id", &self.wallet_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use florin_core::crypto::signature_from_base64;

    const PASS: &str = "correct horse battery staple";

    fn output(id: &str, amount: u64) -> SpendableOutput {
        SpendableOutput {
            id: id.into(),
            amount,
            spent: false,
        }
    }

    #[test]
    fn create_derives_consistent_identity() {
        let (wallet, record) = Wallet::create(PASS).unwrap();
        assert_eq!(record.public_key, wallet.public_key().to_base64());
        assert_eq!(record.wallet_id, wallet.wallet_id().to_string());
        assert_eq!(
            *wallet.wallet_id(),
            WalletId::derive(wallet.public_key())
        );
    }

    #[test]
    fn create_unique_keys() {
        let (w1, _) = Wallet::create(PASS).unwrap();
        let (w2, _) = Wallet::create(PASS).unwrap();
        assert_ne!(w1.wallet_id(), w2.wallet_id());
    }

    #[test]
    fn create_empty_passphrase_rejected() {
        let err = Wallet::create("").unwrap_err();
        assert!(matches!(err, WalletError::InvalidInput(_)));
    }

    #[test]
    fn open_from_record() {
        let (wallet, record) = Wallet::create(PASS).unwrap();
        let reopened = Wallet::open(&record).unwrap();
        assert_eq!(reopened.wallet_id(), wallet.wallet_id());
        assert_eq!(reopened.public_key(), wallet.public_key());
    }

    #[test]
    fn open_rejects_mismatched_wallet_id() {
        let (_, mut record) = Wallet::create(PASS).unwrap();
        record.wallet_id = "00".repeat(32);
        let err = Wallet::open(&record).unwrap_err();
        assert!(matches!(err, WalletError::InvalidKey(_)));
    }

    #[test]
    fn open_rejects_garbage_public_key() {
        let (_, mut record) = Wallet::create(PASS).unwrap();
        record.public_key = "***".into();
        let err = Wallet::open(&record).unwrap_err();
        assert!(matches!(err, WalletError::InvalidKey(_)));
    }

    #[test]
    fn registration_matches_identity() {
        let (wallet, _) = Wallet::create(PASS).unwrap();
        let req = wallet.registration();
        assert_eq!(req.wallet_id, wallet.wallet_id().to_string());
        assert_eq!(req.public_key, wallet.public_key().to_base64());
    }

    #[test]
    fn balance_ignores_spent() {
        let (wallet, _) = Wallet::create(PASS).unwrap();
        let outputs = vec![
            output("a", 30),
            SpendableOutput {
                id: "b".into(),
                amount: 50,
                spent: true,
            },
            output("c", 20),
        ];
        assert_eq!(wallet.balance(&outputs), 50);
    }

    #[test]
    fn unlock_wrong_passphrase() {
        let (wallet, _) = Wallet::create(PASS).unwrap();
        let err = wallet.unlock("wrong").unwrap_err();
        assert_eq!(err, WalletError::DecryptionFailed);
    }

    #[test]
    fn unlock_detects_swapped_record_halves() {
        // Pair wallet A's public key with wallet B's encrypted key.
        let (_, record_a) = Wallet::create(PASS).unwrap();
        let (_, record_b) = Wallet::create(PASS).unwrap();
        let franken = StoredWallet {
            public_key: record_a.public_key.clone(),
            encrypted_private_key: record_b.encrypted_private_key.clone(),
            wallet_id: record_a.wallet_id.clone(),
            created_at: record_a.created_at.clone(),
        };
        let wallet = Wallet::open(&franken).unwrap();
        let err = wallet.unlock(PASS).unwrap_err();
        assert!(matches!(err, WalletError::InvalidKey(_)));
    }

    #[test]
    fn send_produces_verifiable_transaction() {
        let (wallet, _) = Wallet::create(PASS).unwrap();
        let outputs = vec![output("a", 30), output("b", 50), output("c", 20)];

        let signed = wallet.send(PASS, &outputs, "receiver-wallet", 40, "hi").unwrap();
        assert_eq!(signed.sender, wallet.wallet_id().to_string());
        assert_eq!(signed.inputs, vec!["a", "b"]);

        let payload = format!(
            "{}|{}|{}|{}|{}",
            signed.sender, signed.receiver, signed.amount, signed.timestamp, signed.note
        );
        let pk = PublicKey::from_base64(&signed.sender_public_key).unwrap();
        let sig = signature_from_base64(&signed.signature).unwrap();
        assert!(pk.verify(payload.as_bytes(), &sig).is_ok());
    }

    #[test]
    fn send_insufficient_funds() {
        let (wallet, _) = Wallet::create(PASS).unwrap();
        let outputs = vec![output("a", 10)];
        let err = wallet.send(PASS, &outputs, "receiver", 40, "").unwrap_err();
        assert_eq!(err, WalletError::InsufficientFunds { have: 10, need: 40 });
    }

    #[test]
    fn send_wrong_passphrase_signs_nothing() {
        let (wallet, _) = Wallet::create(PASS).unwrap();
        let outputs = vec![output("a", 100)];
        let err = wallet.send("wrong", &outputs, "receiver", 40, "").unwrap_err();
        assert_eq!(err, WalletError::DecryptionFailed);
    }

    #[test]
    fn each_send_unlocks_fresh() {
        // Per-operation sessions: two sends both succeed, neither reuses
        // the other's unlocked key.
        let (wallet, _) = Wallet::create(PASS).unwrap();
        let outputs = vec![output("a", 100)];
        let t1 = wallet.send(PASS, &outputs, "receiver", 40, "first").unwrap();
        let t2 = wallet.send(PASS, &outputs, "receiver", 40, "second").unwrap();
        assert_ne!(t1.signature, t2.signature);
    }

    #[test]
    fn debug_hides_encrypted_blob() {
        let (wallet, record) = Wallet::create(PASS).unwrap();
        let debug = format!("{wallet:?}");
        assert!(!debug.contains(&record.encrypted_private_key));
    }
}

//! Scoped access to a decrypted private key.
//!
//! An [`UnlockSession`] is the only place plaintext key material exists.
//! It is opened for one signing operation and wiped on every exit path:
//! the wrapped signing key zeroizes on drop, and all intermediate buffers
//! (decrypted text, decoded bytes) are `Zeroizing`. Abandoning a session
//! before signing wipes the key just the same.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::fmt;
use zeroize::Zeroizing;

use florin_core::crypto::{KEYPAIR_BYTES, KeyPair, PublicKey, SIGNATURE_BYTES};

use crate::error::WalletError;
use crate::vault;

/// A transient unlocked keypair, alive for one signing operation.
pub struct UnlockSession {
    keypair: KeyPair,
}

impl UnlockSession {
    /// Decrypt a vault blob and take scoped ownership of the keypair.
    ///
    /// A wrong passphrase propagates [`WalletError::DecryptionFailed`]
    /// verbatim; retrying is the user's call, never done here. Decrypted
    /// material that is not a valid 64-byte keypair fails with
    /// [`WalletError::InvalidKey`].
    pub fn open(encrypted_private_key: &str, passphrase: &str) -> Result<Self, WalletError> {
        let plaintext = vault::decrypt(encrypted_private_key, passphrase)?;
        let decoded = Zeroizing::new(
            BASE64
                .decode(plaintext.as_bytes())
                .map_err(|_| WalletError::InvalidKey("private key is not valid base64".into()))?,
        );
        if decoded.len() != KEYPAIR_BYTES {
            return Err(WalletError::InvalidKey(format!(
                "expected {} key bytes, got {}",
                KEYPAIR_BYTES,
                decoded.len()
            )));
        }
        let mut bytes = Zeroizing::new([0u8; KEYPAIR_BYTES]);
        bytes.copy_from_slice(&decoded);
        let keypair = KeyPair::from_keypair_bytes(&bytes)?;
        Ok(Self { keypair })
    }

    /// The public half of the unlocked keypair.
    pub fn public_key(&self) -> PublicKey {
        self.keypair.public_key()
    }

    /// Sign a canonical payload with the unlocked key.
    pub fn sign(&self, payload: &[u8]) -> [u8; SIGNATURE_BYTES] {
        self.keypair.sign(payload)
    }
}

impl fmt::Debug for UnlockSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnlockSession")
            .field("public_key", &self.keypair.public_key())
            .finish_non_exhaustive()
    }
}

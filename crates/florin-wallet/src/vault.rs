//! Passphrase-based encryption for private key material.
//!
//! Argon2id derives a 256-bit key from the passphrase; AES-256-GCM
//! encrypts. The KDF parameters are embedded in the blob alongside the
//! salt and nonce, so a blob is always self-contained and old backups
//! keep decrypting after a parameter upgrade.
//!
//! # Blob format
//! ```text
//! version (1) || m_cost (4 LE) || t_cost (4 LE) || p_cost (4 LE)
//!   || salt (16) || nonce (12) || ciphertext + auth_tag
//! ```
//! The whole blob is base64-encoded so it is printable and safe to store
//! as text.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use zeroize::Zeroizing;

use crate::error::WalletError;

/// Current blob format version.
const BLOB_VERSION: u8 = 1;

/// Salt length in bytes.
const SALT_LEN: usize = 16;

/// AES-GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

/// Derived key length in bytes.
const KEY_LEN: usize = 32;

/// Fixed header: version + three KDF params + salt + nonce.
const HEADER_LEN: usize = 1 + 12 + SALT_LEN + NONCE_LEN;

/// Minimum decoded blob size (header + auth tag).
const MIN_BLOB_LEN: usize = HEADER_LEN + 16;

/// Default Argon2id memory cost in KiB.
pub const DEFAULT_M_COST: u32 = 19_456;

/// Default Argon2id iteration count.
pub const DEFAULT_T_COST: u32 = 2;

/// Default Argon2id parallelism.
pub const DEFAULT_P_COST: u32 = 1;

/// Largest memory cost accepted from a blob header, in KiB (1 GiB).
const MAX_M_COST: u32 = 1 << 20;

/// Largest iteration count accepted from a blob header.
const MAX_T_COST: u32 = 64;

/// Largest parallelism accepted from a blob header.
const MAX_P_COST: u32 = 16;

/// Derive a 256-bit encryption key from a passphrase with Argon2id.
fn derive_key(
    passphrase: &str,
    salt: &[u8],
    m_cost: u32,
    t_cost: u32,
    p_cost: u32,
) -> Result<Zeroizing<[u8; KEY_LEN]>, WalletError> {
    let params = Params::new(m_cost, t_cost, p_cost, Some(KEY_LEN))
        .map_err(|e| WalletError::Encryption(e.to_string()))?;
    let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    argon
        .hash_password_into(passphrase.as_bytes(), salt, key.as_mut())
        .map_err(|e| WalletError::Encryption(e.to_string()))?;
    Ok(key)
}

/// Encrypt a plaintext string under a passphrase.
///
/// Generates a random salt and nonce per call. Fails with
/// [`WalletError::InvalidInput`] if either argument is empty.
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<String, WalletError> {
    if plaintext.is_empty() {
        return Err(WalletError::InvalidInput("plaintext is empty".into()));
    }
    if passphrase.is_empty() {
        return Err(WalletError::InvalidInput("passphrase is empty".into()));
    }

    use rand::RngCore;
    let mut salt = [0u8; SALT_LEN];
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

    let key = derive_key(passphrase, &salt, DEFAULT_M_COST, DEFAULT_T_COST, DEFAULT_P_COST)?;
    let cipher = Aes256Gcm::new_from_slice(key.as_ref())
        .map_err(|e| WalletError::Encryption(e.to_string()))?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| WalletError::Encryption(e.to_string()))?;

    let mut blob = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    blob.push(BLOB_VERSION);
    blob.extend_from_slice(&DEFAULT_M_COST.to_le_bytes());
    blob.extend_from_slice(&DEFAULT_T_COST.to_le_bytes());
    blob.extend_from_slice(&DEFAULT_P_COST.to_le_bytes());
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(blob))
}

/// Decrypt a blob produced by [`encrypt`].
///
/// A wrong passphrase is positively detected by the GCM authentication
/// tag; it never returns garbage. Malformed blobs, unknown versions, and
/// tag mismatches all fail with [`WalletError::DecryptionFailed`], the one
/// unambiguous error kind the caller surfaces for a retry.
pub fn decrypt(blob: &str, passphrase: &str) -> Result<Zeroizing<String>, WalletError> {
    let decoded = BASE64
        .decode(blob)
        .map_err(|_| WalletError::DecryptionFailed)?;
    if decoded.len() < MIN_BLOB_LEN {
        return Err(WalletError::DecryptionFailed);
    }
    if decoded[0] != BLOB_VERSION {
        return Err(WalletError::DecryptionFailed);
    }

    let m_cost = u32::from_le_bytes(decoded[1..5].try_into().expect("fixed slice"));
    let t_cost = u32::from_le_bytes(decoded[5..9].try_into().expect("fixed slice"));
    let p_cost = u32::from_le_bytes(decoded[9..13].try_into().expect("fixed slice"));
    // The header is attacker-controlled until the tag verifies; a blob
    // demanding absurd KDF work is malformed, not a bill to be paid.
    if m_cost > MAX_M_COST || t_cost > MAX_T_COST || p_cost > MAX_P_COST {
        return Err(WalletError::DecryptionFailed);
    }
    let salt = &decoded[13..13 + SALT_LEN];
    let nonce_bytes = &decoded[13 + SALT_LEN..HEADER_LEN];
    let ciphertext = &decoded[HEADER_LEN..];

    let key = derive_key(passphrase, salt, m_cost, t_cost, p_cost)
        .map_err(|_| WalletError::DecryptionFailed)?;
    let cipher = Aes256Gcm::new_from_slice(key.as_ref())
        .map_err(|_| WalletError::DecryptionFailed)?;
    let nonce = Nonce::from_slice(nonce_bytes);

    let plaintext = Zeroizing::new(
        cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| WalletError::DecryptionFailed)?,
    );
    let text = std::str::from_utf8(&plaintext).map_err(|_| WalletError::DecryptionFailed)?;
    Ok(Zeroizing::new(text.to_string()))
}

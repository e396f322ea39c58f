//! Encrypted key persistence, keyed by wallet slot.
//!
//! A [`StoredWallet`] record pairs the public key with its encrypted
//! private key; the two are always written and read together so wallet
//! identity can never desynchronize from signing capability. The on-disk
//! shape doubles as the backup-file format, so a backup can be dropped
//! into a slot directly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::WalletError;

/// The default slot for a single-wallet device.
pub const DEFAULT_SLOT: &str = "device";

/// The persisted wallet record.
///
/// `encrypted_private_key` is the opaque vault blob; `public_key` is the
/// base64 wire text; `wallet_id` is stored redundantly so backups are
/// self-describing.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StoredWallet {
    /// Base64 of the 32-byte Ed25519 public key.
    pub public_key: String,
    /// Vault blob holding the base64 private key.
    pub encrypted_private_key: String,
    /// Lowercase-hex wallet id derived from `public_key`.
    pub wallet_id: String,
    /// ISO-8601 creation instant.
    pub created_at: String,
}

/// Persistence interface for wallet records, parameterized by slot id.
///
/// Slots replace the single implicit "current wallet"; each slot holds at
/// most one record and saves overwrite it whole.
pub trait KeyStore {
    /// Persist a record into a slot, replacing any previous record.
    ///
    /// Must be atomic: a failed save leaves the previous record intact,
    /// never a torn write.
    fn save(&self, slot: &str, record: &StoredWallet) -> Result<(), WalletError>;

    /// Load the record in a slot.
    ///
    /// An empty slot is [`WalletError::NotFound`] — a normal condition on
    /// first start, not a failure.
    fn load(&self, slot: &str) -> Result<StoredWallet, WalletError>;
}

/// File-backed key store: one JSON file per slot under a directory.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    dir: PathBuf,
}

impl FileKeyStore {
    /// Create a store rooted at `dir`. The directory is created on the
    /// first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf, WalletError> {
        if slot.is_empty()
            || !slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(WalletError::InvalidInput(format!(
                "invalid slot id: {slot:?}"
            )));
        }
        Ok(self.dir.join(format!("{slot}.wallet.json")))
    }
}

impl KeyStore for FileKeyStore {
    fn save(&self, slot: &str, record: &StoredWallet) -> Result<(), WalletError> {
        let path = self.slot_path(slot)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| WalletError::Io(e.to_string()))?;

        let json = serde_json::to_vec_pretty(record)
            .map_err(|e| WalletError::Serialization(e.to_string()))?;

        // Write to a sibling temp file, then rename over the slot. The
        // rename is atomic, so readers see either the old record or the
        // new one, never a partial write.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json).map_err(|e| WalletError::Io(e.to_string()))?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            WalletError::Io(e.to_string())
        })?;

        debug!(slot, path = %path.display(), "saved wallet record");
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<StoredWallet, WalletError> {
        let path = self.slot_path(slot)?;
        let data = match std::fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(slot, "no wallet record in slot");
                return Err(WalletError::NotFound);
            }
            Err(e) => return Err(WalletError::Io(e.to_string())),
        };
        serde_json::from_slice(&data).map_err(|e| WalletError::Serialization(e.to_string()))
    }
}

/// Read a record from an exported backup file.
///
/// Backups share the [`StoredWallet`] JSON shape; extra fields (such as a
/// free-text reminder note) are ignored.
pub fn read_backup(path: &Path) -> Result<StoredWallet, WalletError> {
    let data = std::fs::read(path).map_err(|e| WalletError::Io(e.to_string()))?;
    serde_json::from_slice(&data).map_err(|e| WalletError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> StoredWallet {
        StoredWallet {
            public_key: "cHVibGljLWtleQ==".into(),
            encrypted_private_key: "b3BhcXVlLWJsb2I=".into(),
            wallet_id: "ab".repeat(32),
            created_at: "2024-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyStore::new(dir.path());
        let record = sample_record();

        store.save(DEFAULT_SLOT, &record).unwrap();
        let loaded = store.load(DEFAULT_SLOT).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn empty_slot_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyStore::new(dir.path());
        assert_eq!(store.load(DEFAULT_SLOT).unwrap_err(), WalletError::NotFound);
    }

    #[test]
    fn save_overwrites_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyStore::new(dir.path());

        let first = sample_record();
        store.save(DEFAULT_SLOT, &first).unwrap();

        let mut second = sample_record();
        second.encrypted_private_key = "bmV3LWJsb2I=".into();
        second.public_key = "bmV3LWtleQ==".into();
        store.save(DEFAULT_SLOT, &second).unwrap();

        assert_eq!(store.load(DEFAULT_SLOT).unwrap(), second);
    }

    #[test]
    fn slots_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyStore::new(dir.path());

        let a = sample_record();
        let mut b = sample_record();
        b.wallet_id = "cd".repeat(32);

        store.save("alpha", &a).unwrap();
        store.save("beta", &b).unwrap();

        assert_eq!(store.load("alpha").unwrap(), a);
        assert_eq!(store.load("beta").unwrap(), b);
    }

    #[test]
    fn invalid_slot_id_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyStore::new(dir.path());
        for bad in ["", "../escape", "a/b", "a b"] {
            assert!(matches!(
                store.load(bad).unwrap_err(),
                WalletError::InvalidInput(_)
            ));
        }
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyStore::new(dir.path());
        store.save(DEFAULT_SLOT, &sample_record()).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .filter(|n| n.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
    }

    #[test]
    fn corrupted_record_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyStore::new(dir.path());
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(dir.path().join("device.wallet.json"), b"garbage").unwrap();

        assert!(matches!(
            store.load(DEFAULT_SLOT).unwrap_err(),
            WalletError::Serialization(_)
        ));
    }

    #[test]
    fn backup_file_reads_as_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet-backup.json");
        // Backups may carry extra advisory fields
        let json = format!(
            r#"{{"public_key":"cHVi","encrypted_private_key":"YmxvYg==","wallet_id":"{}","created_at":"2024-01-01T00:00:00.000Z","note":"Keep this file safe."}}"#,
            "ab".repeat(32)
        );
        std::fs::write(&path, json).unwrap();

        let record = read_backup(&path).unwrap();
        assert_eq!(record.public_key, "cHVi");
        assert_eq!(record.wallet_id, "ab".repeat(32));
    }
}

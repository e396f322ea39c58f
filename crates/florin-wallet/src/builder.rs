//! Transaction drafting and canonical payload construction.
//!
//! The canonical payload is a strict wire contract: the ledger joins the
//! same five fields with `|` in the same order before verifying the
//! signature. Any reordering, re-encoding, or whitespace change breaks
//! verification remotely, so the payload is built from the draft fields
//! byte-for-byte and nowhere else.

use chrono::{SecondsFormat, Utc};

use florin_core::types::{SpendableOutput, TransactionDraft};

use crate::error::WalletError;
use crate::selection::OutputSelector;

/// Upper bound on the free-text note, in bytes.
pub const MAX_NOTE_LEN: usize = 256;

/// The exact byte sequence that gets signed:
/// `sender|receiver|amount|timestamp|note`.
///
/// Amount renders as plain decimal (no sign, no leading zeros); the note
/// is raw and unescaped.
pub fn canonical_payload(draft: &TransactionDraft) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        draft.sender, draft.receiver, draft.amount, draft.timestamp, draft.note
    )
}

/// Current UTC instant in the contract's timestamp shape:
/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builder for a [`TransactionDraft`].
///
/// Validates the caller's fields, runs output selection, and stamps the
/// timestamp. The draft is immutable once signed.
pub struct TransactionBuilder {
    sender: String,
    receiver: String,
    amount: u64,
    note: String,
    timestamp: Option<String>,
}

impl TransactionBuilder {
    /// Start a draft from sender, receiver, and amount.
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: u64,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
            note: String::new(),
            timestamp: None,
        }
    }

    /// Attach a free-text note.
    pub fn set_note(&mut self, note: impl Into<String>) -> &mut Self {
        self.note = note.into();
        self
    }

    /// Override the timestamp (default: current UTC instant). The string
    /// goes into the signed payload verbatim.
    pub fn set_timestamp(&mut self, timestamp: impl Into<String>) -> &mut Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Validate the fields, select funding outputs, and produce the draft.
    ///
    /// Receiver existence is not checked here; that is the ledger's job.
    pub fn build(&self, outputs: &[SpendableOutput]) -> Result<TransactionDraft, WalletError> {
        if self.amount == 0 {
            return Err(WalletError::InvalidInput("amount must be positive".into()));
        }
        if self.receiver.trim().is_empty() {
            return Err(WalletError::InvalidInput("receiver is required".into()));
        }
        if self.note.len() > MAX_NOTE_LEN {
            return Err(WalletError::InvalidInput(format!(
                "note exceeds {MAX_NOTE_LEN} bytes"
            )));
        }

        let selection = OutputSelector::select(outputs, self.amount)?;

        Ok(TransactionDraft {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            amount: self.amount,
            note: self.note.clone(),
            timestamp: self
                .timestamp
                .clone()
                .unwrap_or_else(current_timestamp),
            inputs: selection.inputs,
        })
    }
}

//! Greedy output selection.
//!
//! Accumulates outputs in the order the snapshot provides them and stops
//! as soon as the running total covers the target. Intentionally not
//! optimal coin selection: the selection feeds the signed payload's input
//! list, so the algorithm is a compatibility contract with the ledger and
//! must stay reproducible. Same snapshot and target, same selection.

use florin_core::types::SpendableOutput;

use crate::error::WalletError;

/// Result of output selection: the chosen input ids and their total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Selected output ids, in snapshot order.
    pub inputs: Vec<String>,
    /// Sum of the selected amounts; always `>= target` on success.
    pub total: u64,
}

/// Deterministic greedy output selector.
pub struct OutputSelector;

impl OutputSelector {
    /// Select outputs covering `target`, in the order provided.
    ///
    /// The snapshot must be pre-filtered to unspent outputs; a spent
    /// output in the slice is a caller bug and is rejected outright
    /// rather than skipped. The slice is never mutated.
    pub fn select(outputs: &[SpendableOutput], target: u64) -> Result<Selection, WalletError> {
        if target == 0 {
            return Err(WalletError::InvalidInput("target must be positive".into()));
        }
        if let Some(spent) = outputs.iter().find(|o| o.spent) {
            return Err(WalletError::InvalidInput(format!(
                "output {} is already spent",
                spent.id
            )));
        }

        let mut inputs = Vec::new();
        let mut total: u64 = 0;
        for output in outputs {
            inputs.push(output.id.clone());
            total = total.saturating_add(output.amount);
            if total >= target {
                return Ok(Selection { inputs, total });
            }
        }

        Err(WalletError::InsufficientFunds {
            have: total,
            need: target,
        })
    }
}

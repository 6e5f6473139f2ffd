//! Application state types
//!
//! Everything here is a per-render snapshot derived from chain reads.
//! Only the wallet address and tier choice survive restarts, via eframe
//! storage under the keys below.

use alloy::primitives::{Address, B256};
use lockmint_core::{LoadStep, StakeSnapshot, TxReceipt};

/// eframe storage key for the saved wallet address.
pub const WALLET_STORAGE_KEY: &str = "lockmint.wallet";

/// eframe storage key for the last viewed tier.
pub const TIER_STORAGE_KEY: &str = "lockmint.tier";

/// Stake page view state.
///
/// Fields keep their defaults until the corresponding read completes; the
/// page body stays behind the progress bar until `loaded` flips.
#[derive(Debug, Default)]
pub struct StakeViewState {
    /// Read progress, 0..=100.
    pub percent: u8,
    /// The full read sequence has completed at least once.
    pub loaded: bool,
    /// Latest chain snapshot.
    pub snapshot: Option<StakeSnapshot>,
    /// A lock or redeem transaction is in flight.
    pub processing: bool,
    /// Hash of the most recent submission, shown as soon as the provider
    /// assigns it.
    pub tx_hash: Option<B256>,
    /// Last submission failure.
    pub error: Option<String>,
    /// Read-sequence failure; blocks the page until a retry succeeds.
    pub load_error: Option<String>,
}

impl StakeViewState {
    /// Rearm the progress screen for a fresh read sequence.
    pub fn reset_for_load(&mut self) {
        self.percent = 0;
        self.loaded = false;
        self.load_error = None;
    }

    /// Advances the gauge. A full gauge alone does not reveal the page;
    /// only [`Self::apply_snapshot`] flips `loaded`, so the body never
    /// renders without data behind it.
    pub fn apply_load_step(&mut self, step: LoadStep) {
        self.percent = step.percent();
    }

    pub fn apply_snapshot(&mut self, snapshot: StakeSnapshot) {
        self.snapshot = Some(snapshot);
        self.percent = 100;
        self.loaded = true;
        self.load_error = None;
    }

    pub fn apply_load_error(&mut self, message: impl Into<String>) {
        self.load_error = Some(message.into());
    }

    /// Settles the initial read sequence.
    pub fn apply_load_outcome(&mut self, outcome: Result<StakeSnapshot, String>) {
        match outcome {
            Ok(snapshot) => self.apply_snapshot(snapshot),
            Err(message) => self.apply_load_error(message),
        }
    }

    /// Settles a background refresh. Failures keep the last good snapshot
    /// on screen and never touch a pending load error; the caller logs
    /// them.
    pub fn apply_refresh_outcome(&mut self, outcome: Result<StakeSnapshot, String>) {
        if let Ok(snapshot) = outcome {
            self.apply_snapshot(snapshot);
        }
    }

    /// A new submission clears the previous failure before the worker
    /// thread reports back. The last hash stays visible until replaced.
    pub fn begin_submission(&mut self) {
        self.processing = true;
        self.error = None;
    }

    pub fn note_pending_hash(&mut self, hash: B256) {
        self.tx_hash = Some(hash);
    }

    pub fn apply_submit_success(&mut self, receipt: TxReceipt) {
        self.processing = false;
        self.error = None;
        self.tx_hash = Some(receipt.tx_hash);
    }

    pub fn apply_submit_error(&mut self, message: impl Into<String>) {
        self.processing = false;
        self.error = Some(message.into());
    }
}

/// Parse a pasted wallet address. Blank means "browse without a wallet".
pub fn parse_wallet_input(input: &str) -> Result<Option<Address>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<Address>()
        .map(Some)
        .map_err(|e| format!("invalid address: {e}"))
}

use std::fmt;
use std::str::FromStr;

use alloy::primitives::{B256, U256};
use serde::{Deserialize, Serialize};

/// Cosmetic tier of the hero collection. Tiers share one lock pool; the
/// selected tier only changes artwork and copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TierKind {
    #[default]
    Silver,
    Gold,
    Diamond,
    Platinum,
}

impl TierKind {
    pub const ALL: [TierKind; 4] = [
        TierKind::Silver,
        TierKind::Gold,
        TierKind::Diamond,
        TierKind::Platinum,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TierKind::Silver => "Silver",
            TierKind::Gold => "Gold",
            TierKind::Diamond => "Diamond",
            TierKind::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TierKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "silver" => Ok(TierKind::Silver),
            "gold" => Ok(TierKind::Gold),
            "diamond" => Ok(TierKind::Diamond),
            "platinum" => Ok(TierKind::Platinum),
            other => Err(format!("unknown tier: {other}")),
        }
    }
}

/// Aggregate pool reads that do not depend on a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolOverview {
    /// Heroes minted so far (`totalSupply` of the NFT contract).
    pub minted: U256,
    /// LP amount the pool requires per lock, in token base units.
    pub lock_amount: U256,
    /// Lock duration as reported by the pool, in minutes.
    pub lock_period_minutes: u64,
}

/// Per-wallet reads against the pool and the LP token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletPosition {
    /// LP token balance, in token base units.
    pub balance: U256,
    /// LP allowance granted to the pool, in token base units.
    pub allowance: U256,
    /// Allowance covers the required lock amount. Recomputed on every
    /// refresh, so it can flip back to false after an allowance change.
    pub allowed: bool,
    pub is_locked: bool,
    pub can_redeem: bool,
    /// Unix timestamp (seconds) at which the current lock can be redeemed.
    /// Zero when the wallet has never locked.
    pub unlock_time_secs: u64,
}

/// One full read sequence against the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeSnapshot {
    pub fetched_at_ms: u64,
    pub overview: PoolOverview,
    /// `None` when no wallet is configured; the page then renders the
    /// aggregate fields only.
    pub position: Option<WalletPosition>,
}

/// Completed step of the initial load sequence. Percent milestones match the
/// order in which the reads are issued, one awaited call after another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStep {
    HeroSupply,
    LockAmount,
    LockPeriod,
    Balance,
    Allowance,
    LockStatus,
    UnlockTime,
    /// Emitted when the sequence ends after the aggregate reads because no
    /// wallet is configured.
    Complete,
}

impl LoadStep {
    pub fn percent(&self) -> u8 {
        match self {
            LoadStep::HeroSupply => 15,
            LoadStep::LockAmount => 30,
            LoadStep::LockPeriod => 45,
            LoadStep::Balance => 60,
            LoadStep::Allowance => 75,
            LoadStep::LockStatus => 90,
            LoadStep::UnlockTime | LoadStep::Complete => 100,
        }
    }
}

/// Settled transaction, as reported by the chain after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: B256,
    pub block_number: u64,
    pub success: bool,
}

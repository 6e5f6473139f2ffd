use alloy::primitives::{Address, B256, U256};
use thiserror::Error;

use crate::domain::TxReceipt;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("transaction reverted: {0}")]
    Reverted(String),
    #[error("conflict: {0}")]
    Conflict(&'static str),
    #[error("timed out: {0}")]
    Timeout(String),
}

/// Hero NFT collection reads.
pub trait HeroNftPort {
    fn total_supply(&self) -> Result<U256, PortError>;
}

/// LP token reads. Only the two views the page needs, not the full ERC-20
/// surface.
pub trait LpTokenPort {
    fn balance_of(&self, owner: Address) -> Result<U256, PortError>;
    fn allowance(&self, owner: Address, spender: Address) -> Result<U256, PortError>;
}

/// Lock pool reads and writes.
///
/// The write methods block until the transaction settles. `on_submit` fires
/// as soon as the node assigns a hash, before the receipt wait starts, so
/// callers can surface the pending transaction immediately.
pub trait LockPoolPort {
    /// Pool contract address, used as the allowance spender.
    fn address(&self) -> Address;
    fn lock_amount(&self) -> Result<U256, PortError>;
    fn lock_period_minutes(&self) -> Result<u64, PortError>;
    fn is_locked(&self, wallet: Address) -> Result<bool, PortError>;
    fn can_redeem(&self, wallet: Address) -> Result<bool, PortError>;
    fn unlock_time(&self, wallet: Address) -> Result<u64, PortError>;
    fn lock(
        &self,
        wallet: Address,
        on_submit: &mut dyn FnMut(B256),
    ) -> Result<TxReceipt, PortError>;
    fn redeem(
        &self,
        wallet: Address,
        on_submit: &mut dyn FnMut(B256),
    ) -> Result<TxReceipt, PortError>;
}

/// Wall-clock source, injected so flows can be replayed under test.
pub trait ClockPort {
    fn now_ms(&self) -> Result<u64, PortError>;
}

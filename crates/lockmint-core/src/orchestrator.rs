use std::sync::Mutex;

use alloy::primitives::{Address, B256};

use crate::domain::{LoadStep, PoolOverview, StakeSnapshot, TxReceipt, WalletPosition};
use crate::ports::{ClockPort, HeroNftPort, LockPoolPort, LpTokenPort, PortError};
use crate::state_machine::{
    submission_transition, StateTransition, SubmissionAction, SubmissionPhase,
};

/// Drives the stake page flows against the injected ports: the sequential
/// snapshot reads, the background refresh, and the two pool writes.
///
/// Writes are single-flight. A second lock or redeem while one is still
/// settling is rejected with [`PortError::Conflict`]; the submission phase
/// machine is the guard, so the conflict falls out of the transition table
/// rather than a separate flag.
pub struct StakeOrchestrator<P, T, H, C>
where
    P: LockPoolPort,
    T: LpTokenPort,
    H: HeroNftPort,
    C: ClockPort,
{
    pub pool: P,
    pub token: T,
    pub hero: H,
    pub clock: C,
    phase: Mutex<SubmissionPhase>,
}

enum PoolWrite {
    Lock,
    Redeem,
}

impl<P, T, H, C> StakeOrchestrator<P, T, H, C>
where
    P: LockPoolPort,
    T: LpTokenPort,
    H: HeroNftPort,
    C: ClockPort,
{
    pub fn new(pool: P, token: T, hero: H, clock: C) -> Self {
        Self {
            pool,
            token,
            hero,
            clock,
            phase: Mutex::new(SubmissionPhase::Idle),
        }
    }

    /// Runs the full read sequence, invoking `on_step` after each completed
    /// read with the milestone it crossed.
    ///
    /// The aggregate reads come first; the wallet reads follow only when a
    /// wallet is configured. Any failed read aborts the sequence and leaves
    /// the caller on whatever state it already holds.
    pub fn load_snapshot(
        &self,
        wallet: Option<Address>,
        on_step: &mut dyn FnMut(LoadStep),
    ) -> Result<StakeSnapshot, PortError> {
        let minted = self.hero.total_supply()?;
        on_step(LoadStep::HeroSupply);
        let lock_amount = self.pool.lock_amount()?;
        on_step(LoadStep::LockAmount);
        let lock_period_minutes = self.pool.lock_period_minutes()?;
        on_step(LoadStep::LockPeriod);

        let overview = PoolOverview {
            minted,
            lock_amount,
            lock_period_minutes,
        };

        let position = match wallet {
            Some(owner) => {
                let balance = self.token.balance_of(owner)?;
                on_step(LoadStep::Balance);
                let allowance = self.token.allowance(owner, self.pool.address())?;
                let can_redeem = self.pool.can_redeem(owner)?;
                on_step(LoadStep::Allowance);
                let is_locked = self.pool.is_locked(owner)?;
                on_step(LoadStep::LockStatus);
                let unlock_time_secs = self.pool.unlock_time(owner)?;
                on_step(LoadStep::UnlockTime);

                Some(WalletPosition {
                    balance,
                    allowance,
                    allowed: allowance >= overview.lock_amount,
                    is_locked,
                    can_redeem,
                    unlock_time_secs,
                })
            }
            None => {
                on_step(LoadStep::Complete);
                None
            }
        };

        Ok(StakeSnapshot {
            fetched_at_ms: self.clock.now_ms()?,
            overview,
            position,
        })
    }

    /// Same reads as [`Self::load_snapshot`] without progress reporting.
    /// Used by the periodic poller.
    pub fn refresh(&self, wallet: Option<Address>) -> Result<StakeSnapshot, PortError> {
        self.load_snapshot(wallet, &mut |_| {})
    }

    /// Submits a lock for `wallet` and blocks until it settles. `on_submit`
    /// receives the transaction hash as soon as the node assigns one.
    pub fn lock(
        &self,
        wallet: Address,
        on_submit: &mut dyn FnMut(B256),
    ) -> Result<TxReceipt, PortError> {
        self.submit(PoolWrite::Lock, wallet, on_submit)
    }

    /// Submits a redeem for `wallet` and blocks until it settles.
    pub fn redeem(
        &self,
        wallet: Address,
        on_submit: &mut dyn FnMut(B256),
    ) -> Result<TxReceipt, PortError> {
        self.submit(PoolWrite::Redeem, wallet, on_submit)
    }

    pub fn submission_phase(&self) -> SubmissionPhase {
        self.phase
            .lock()
            .map(|guard| *guard)
            .unwrap_or(SubmissionPhase::Failed)
    }

    fn submit(
        &self,
        write: PoolWrite,
        wallet: Address,
        on_submit: &mut dyn FnMut(B256),
    ) -> Result<TxReceipt, PortError> {
        self.begin_submission()?;

        let mut relay = |hash: B256| {
            let _ = self.apply_phase(SubmissionAction::HashAssigned);
            on_submit(hash);
        };

        let settled = match write {
            PoolWrite::Lock => self.pool.lock(wallet, &mut relay),
            PoolWrite::Redeem => self.pool.redeem(wallet, &mut relay),
        };

        match settled {
            Ok(receipt) => {
                self.apply_phase(SubmissionAction::Confirm)?;
                Ok(receipt)
            }
            Err(err) => {
                let _ = self.apply_phase(SubmissionAction::Fail);
                Err(err)
            }
        }
    }

    /// Moves the phase machine to `Submitting`, or reports a conflict when a
    /// submission is already in flight.
    fn begin_submission(&self) -> Result<StateTransition, PortError> {
        let mut phase = self
            .phase
            .lock()
            .map_err(|e| PortError::Transport(format!("submission phase lock poisoned: {e}")))?;
        match submission_transition(*phase, SubmissionAction::Submit) {
            Ok((next, transition)) => {
                *phase = next;
                Ok(transition)
            }
            Err(_) => Err(PortError::Conflict("a submission is already in flight")),
        }
    }

    fn apply_phase(&self, action: SubmissionAction) -> Result<StateTransition, PortError> {
        let mut phase = self
            .phase
            .lock()
            .map_err(|e| PortError::Transport(format!("submission phase lock poisoned: {e}")))?;
        let (next, transition) = submission_transition(*phase, action)?;
        *phase = next;
        Ok(transition)
    }
}

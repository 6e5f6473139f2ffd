use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use alloy::primitives::{Address, B256, U256};
use lockmint_core::{
    ClockPort, HeroNftPort, LockPoolPort, LpTokenPort, PortError, StakeOrchestrator,
    SubmissionPhase, TxReceipt,
};

fn owner() -> Address {
    Address::repeat_byte(0x11)
}

fn pool_address() -> Address {
    Address::repeat_byte(0x22)
}

fn tx_hash() -> B256 {
    B256::repeat_byte(0xab)
}

struct TestClock {
    now: AtomicU64,
}

impl Default for TestClock {
    fn default() -> Self {
        Self {
            now: AtomicU64::new(1_000),
        }
    }
}

impl ClockPort for TestClock {
    fn now_ms(&self) -> Result<u64, PortError> {
        Ok(self.now.fetch_add(1, Ordering::SeqCst))
    }
}

struct FakeHero {
    supply: U256,
}

impl Default for FakeHero {
    fn default() -> Self {
        Self {
            supply: U256::from(42u64),
        }
    }
}

impl HeroNftPort for FakeHero {
    fn total_supply(&self) -> Result<U256, PortError> {
        Ok(self.supply)
    }
}

struct FakeToken {
    balance: U256,
    allowance: U256,
    fail_balance: bool,
    last_spender: Mutex<Option<Address>>,
}

impl Default for FakeToken {
    fn default() -> Self {
        Self {
            balance: U256::from(5_000u64),
            allowance: U256::from(1_000u64),
            fail_balance: false,
            last_spender: Mutex::new(None),
        }
    }
}

impl LpTokenPort for FakeToken {
    fn balance_of(&self, _owner: Address) -> Result<U256, PortError> {
        if self.fail_balance {
            return Err(PortError::Transport("node unreachable".to_owned()));
        }
        Ok(self.balance)
    }

    fn allowance(&self, _owner: Address, spender: Address) -> Result<U256, PortError> {
        *self.last_spender.lock().expect("spender lock") = Some(spender);
        Ok(self.allowance)
    }
}

struct FakePool {
    lock_amount: U256,
    lock_period_minutes: u64,
    is_locked: bool,
    can_redeem: bool,
    unlock_time: u64,
    write_error: Mutex<Option<PortError>>,
}

impl Default for FakePool {
    fn default() -> Self {
        Self {
            lock_amount: U256::from(1_000u64),
            lock_period_minutes: 30,
            is_locked: false,
            can_redeem: false,
            unlock_time: 0,
            write_error: Mutex::new(None),
        }
    }
}

impl FakePool {
    fn settle(&self, on_submit: &mut dyn FnMut(B256)) -> Result<TxReceipt, PortError> {
        if let Some(err) = self.write_error.lock().expect("write error lock").take() {
            return Err(err);
        }
        on_submit(tx_hash());
        Ok(TxReceipt {
            tx_hash: tx_hash(),
            block_number: 7,
            success: true,
        })
    }
}

impl LockPoolPort for FakePool {
    fn address(&self) -> Address {
        pool_address()
    }

    fn lock_amount(&self) -> Result<U256, PortError> {
        Ok(self.lock_amount)
    }

    fn lock_period_minutes(&self) -> Result<u64, PortError> {
        Ok(self.lock_period_minutes)
    }

    fn is_locked(&self, _wallet: Address) -> Result<bool, PortError> {
        Ok(self.is_locked)
    }

    fn can_redeem(&self, _wallet: Address) -> Result<bool, PortError> {
        Ok(self.can_redeem)
    }

    fn unlock_time(&self, _wallet: Address) -> Result<u64, PortError> {
        Ok(self.unlock_time)
    }

    fn lock(
        &self,
        _wallet: Address,
        on_submit: &mut dyn FnMut(B256),
    ) -> Result<TxReceipt, PortError> {
        self.settle(on_submit)
    }

    fn redeem(
        &self,
        _wallet: Address,
        on_submit: &mut dyn FnMut(B256),
    ) -> Result<TxReceipt, PortError> {
        self.settle(on_submit)
    }
}

fn orchestrator(
    pool: FakePool,
    token: FakeToken,
) -> StakeOrchestrator<FakePool, FakeToken, FakeHero, TestClock> {
    StakeOrchestrator::new(pool, token, FakeHero::default(), TestClock::default())
}

#[test]
fn wallet_load_walks_every_milestone() {
    let orch = orchestrator(FakePool::default(), FakeToken::default());

    let mut steps = Vec::new();
    let snapshot = orch
        .load_snapshot(Some(owner()), &mut |step| steps.push(step.percent()))
        .expect("load snapshot");

    assert_eq!(steps, vec![15, 30, 45, 60, 75, 90, 100]);
    assert_eq!(snapshot.overview.minted, U256::from(42u64));
    assert_eq!(snapshot.overview.lock_amount, U256::from(1_000u64));
    assert_eq!(snapshot.overview.lock_period_minutes, 30);

    let position = snapshot.position.expect("wallet position");
    assert_eq!(position.balance, U256::from(5_000u64));
    assert!(position.allowed);
    assert!(!position.is_locked);
}

#[test]
fn load_without_wallet_skips_position_reads() {
    let orch = orchestrator(FakePool::default(), FakeToken::default());

    let mut steps = Vec::new();
    let snapshot = orch
        .load_snapshot(None, &mut |step| steps.push(step.percent()))
        .expect("load snapshot");

    assert_eq!(steps, vec![15, 30, 45, 100]);
    assert!(snapshot.position.is_none());
}

#[test]
fn allowance_is_checked_against_pool_address() {
    let token = FakeToken::default();
    let orch = orchestrator(FakePool::default(), token);

    orch.refresh(Some(owner())).expect("refresh");

    let spender = orch
        .token
        .last_spender
        .lock()
        .expect("spender lock")
        .take()
        .expect("allowance queried");
    assert_eq!(spender, pool_address());
}

#[test]
fn allowed_flag_tracks_the_required_amount() {
    let exact = FakeToken {
        allowance: U256::from(1_000u64),
        ..Default::default()
    };
    let orch = orchestrator(FakePool::default(), exact);
    let snapshot = orch.refresh(Some(owner())).expect("refresh");
    assert!(snapshot.position.expect("position").allowed);

    let short = FakeToken {
        allowance: U256::from(999u64),
        ..Default::default()
    };
    let orch = orchestrator(FakePool::default(), short);
    let snapshot = orch.refresh(Some(owner())).expect("refresh");
    assert!(!snapshot.position.expect("position").allowed);
}

#[test]
fn failed_read_aborts_the_sequence() {
    let token = FakeToken {
        fail_balance: true,
        ..Default::default()
    };
    let orch = orchestrator(FakePool::default(), token);

    let mut steps = Vec::new();
    let err = orch
        .load_snapshot(Some(owner()), &mut |step| steps.push(step.percent()))
        .expect_err("balance read must fail");

    assert!(matches!(err, PortError::Transport(_)));
    assert_eq!(steps, vec![15, 30, 45]);
}

#[test]
fn refresh_advances_the_snapshot_timestamp() {
    let orch = orchestrator(FakePool::default(), FakeToken::default());

    let first = orch.refresh(None).expect("first refresh");
    let second = orch.refresh(None).expect("second refresh");
    assert!(second.fetched_at_ms > first.fetched_at_ms);
}

#[test]
fn lock_reports_hash_before_settling() {
    let orch = orchestrator(FakePool::default(), FakeToken::default());

    let mut seen = Vec::new();
    let receipt = orch
        .lock(owner(), &mut |hash| seen.push(hash))
        .expect("lock settles");

    assert_eq!(seen, vec![tx_hash()]);
    assert_eq!(receipt.tx_hash, tx_hash());
    assert!(receipt.success);
    assert_eq!(orch.submission_phase(), SubmissionPhase::Confirmed);
}

#[test]
fn rejected_submission_fails_and_allows_retry() {
    let pool = FakePool {
        write_error: Mutex::new(Some(PortError::Rejected(
            "user rejected in wallet".to_owned(),
        ))),
        ..Default::default()
    };
    let orch = orchestrator(pool, FakeToken::default());

    let mut seen = Vec::new();
    let err = orch
        .redeem(owner(), &mut |hash| seen.push(hash))
        .expect_err("rejected");
    assert!(err.to_string().contains("user rejected"));
    assert!(seen.is_empty());
    assert_eq!(orch.submission_phase(), SubmissionPhase::Failed);

    let receipt = orch.redeem(owner(), &mut |_| {}).expect("retry settles");
    assert!(receipt.success);
    assert_eq!(orch.submission_phase(), SubmissionPhase::Confirmed);
}

#[test]
fn second_submission_while_in_flight_conflicts() {
    let orch = orchestrator(FakePool::default(), FakeToken::default());

    let mut inner: Option<PortError> = None;
    let receipt = orch
        .lock(owner(), &mut |_hash| {
            inner = orch.lock(owner(), &mut |_| {}).err();
        })
        .expect("outer lock settles");

    assert!(receipt.success);
    let err = inner.expect("inner lock must be rejected");
    assert!(matches!(err, PortError::Conflict(_)));
    assert_eq!(orch.submission_phase(), SubmissionPhase::Confirmed);
}

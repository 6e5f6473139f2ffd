use alloy::primitives::{Address, B256, U256};

use lockmint_adapters::{
    ChainClient, HeroNftClient, LockPoolClient, LpTokenClient, StakeConfig, SystemClockAdapter,
};
use lockmint_core::{PortError, StakeOrchestrator};

fn wallet() -> Address {
    Address::repeat_byte(0x77)
}

fn offline_orchestrator(
) -> StakeOrchestrator<LockPoolClient, LpTokenClient, HeroNftClient, SystemClockAdapter> {
    let config = StakeConfig {
        wallet: Some(wallet()),
        ..StakeConfig::default()
    };
    let chain = ChainClient::from_config(&config).expect("deterministic chain");
    StakeOrchestrator::new(
        LockPoolClient::new(chain.clone(), config.lock_pool_address),
        LpTokenClient::new(chain.clone(), config.lp_token_address),
        HeroNftClient::new(chain, config.hero_nft_address),
        SystemClockAdapter,
    )
}

fn one_lp() -> U256 {
    U256::from(10u64).pow(U256::from(18u64))
}

#[test]
fn offline_snapshot_reads_the_seeded_pool() {
    let orch = offline_orchestrator();

    let mut steps = Vec::new();
    let snapshot = orch
        .load_snapshot(Some(wallet()), &mut |step| steps.push(step.percent()))
        .expect("offline load");

    assert_eq!(steps, vec![15, 30, 45, 60, 75, 90, 100]);
    assert_eq!(snapshot.overview.minted, U256::ZERO);
    assert_eq!(snapshot.overview.lock_amount, one_lp());
    assert_eq!(snapshot.overview.lock_period_minutes, 30);

    let position = snapshot.position.expect("seeded position");
    assert_eq!(position.balance, one_lp() * U256::from(10u64));
    assert!(position.allowed);
    assert!(!position.is_locked);
    assert!(!position.can_redeem);
    assert_eq!(position.unlock_time_secs, 0);
}

#[test]
fn lock_then_redeem_roundtrip_with_elapsed_period() {
    let config = StakeConfig {
        wallet: Some(wallet()),
        ..StakeConfig::default()
    };
    let chain = ChainClient::from_config(&config).expect("deterministic chain");
    chain.debug_set_lock_period(0).expect("zero lock period");

    let orch = StakeOrchestrator::new(
        LockPoolClient::new(chain.clone(), config.lock_pool_address),
        LpTokenClient::new(chain.clone(), config.lp_token_address),
        HeroNftClient::new(chain, config.hero_nft_address),
        SystemClockAdapter,
    );

    let mut hashes = Vec::new();
    let receipt = orch
        .lock(wallet(), &mut |hash| hashes.push(hash))
        .expect("lock settles");
    assert!(receipt.success);
    assert_eq!(hashes.len(), 1);
    assert_ne!(hashes[0], B256::ZERO);

    let locked = orch.refresh(Some(wallet())).expect("refresh after lock");
    assert_eq!(locked.overview.minted, U256::from(1u64));
    let position = locked.position.expect("position");
    assert!(position.is_locked);
    assert!(position.can_redeem);
    assert!(position.unlock_time_secs > 0);
    assert_eq!(position.balance, one_lp() * U256::from(9u64));

    let redeemed = orch.redeem(wallet(), &mut |_| {}).expect("redeem settles");
    assert!(redeemed.success);
    assert_ne!(redeemed.tx_hash, receipt.tx_hash);

    let after = orch.refresh(Some(wallet())).expect("refresh after redeem");
    let position = after.position.expect("position");
    assert!(!position.is_locked);
    assert!(!position.can_redeem);
    assert_eq!(position.balance, one_lp() * U256::from(10u64));
    // Redeeming returns the LP; the minted hero count stays where it was.
    assert_eq!(after.overview.minted, U256::from(1u64));
}

#[test]
fn redeem_before_maturity_reverts() {
    let orch = offline_orchestrator();

    orch.lock(wallet(), &mut |_| {}).expect("lock settles");

    let err = orch.redeem(wallet(), &mut |_| {}).expect_err("too early");
    assert!(matches!(err, PortError::Reverted(_)));
    assert!(err.to_string().contains("lock period not over"));
}

#[test]
fn double_lock_reverts() {
    let orch = offline_orchestrator();

    orch.lock(wallet(), &mut |_| {}).expect("first lock");

    let err = orch.lock(wallet(), &mut |_| {}).expect_err("second lock");
    assert!(matches!(err, PortError::Reverted(_)));
    assert!(err.to_string().contains("already locked"));
}

#[test]
fn unseen_wallets_are_funded_on_first_contact() {
    let orch = offline_orchestrator();
    let stranger = Address::repeat_byte(0x99);

    let snapshot = orch.refresh(Some(stranger)).expect("stranger refresh");
    let position = snapshot.position.expect("stranger position");
    assert_eq!(position.balance, one_lp() * U256::from(10u64));
    assert!(position.allowed);
}

#[test]
fn unknown_receipt_lookup_is_rejected() {
    let config = StakeConfig::default();
    let chain = ChainClient::from_config(&config).expect("deterministic chain");

    let err = chain
        .wait_for_receipt(B256::repeat_byte(0x42))
        .expect_err("unknown hash");
    assert!(matches!(err, PortError::Validation(_)));
    assert!(err.to_string().contains("unknown transaction"));
}

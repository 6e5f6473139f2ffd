use alloy::primitives::U256;
use lockmint_core::{LoadStep, PoolOverview, StakeSnapshot, TierKind, WalletPosition};

#[test]
fn tier_parsing_is_case_insensitive() {
    assert_eq!("silver".parse::<TierKind>().expect("parse"), TierKind::Silver);
    assert_eq!("GOLD".parse::<TierKind>().expect("parse"), TierKind::Gold);
    assert_eq!(" Diamond ".parse::<TierKind>().expect("parse"), TierKind::Diamond);
    assert_eq!("platinum".parse::<TierKind>().expect("parse"), TierKind::Platinum);

    let err = "bronze".parse::<TierKind>().expect_err("must fail");
    assert!(err.contains("unknown tier"));
}

#[test]
fn tier_labels_roundtrip_through_display() {
    for tier in TierKind::ALL {
        let parsed = tier.to_string().parse::<TierKind>().expect("roundtrip");
        assert_eq!(parsed, tier);
    }
}

#[test]
fn load_steps_report_monotonic_percentages() {
    let wallet_sequence = [
        LoadStep::HeroSupply,
        LoadStep::LockAmount,
        LoadStep::LockPeriod,
        LoadStep::Balance,
        LoadStep::Allowance,
        LoadStep::LockStatus,
        LoadStep::UnlockTime,
    ];

    let percents: Vec<u8> = wallet_sequence.iter().map(LoadStep::percent).collect();
    assert_eq!(percents, vec![15, 30, 45, 60, 75, 90, 100]);
    assert_eq!(LoadStep::Complete.percent(), 100);
}

#[test]
fn snapshot_roundtrip_serialization() {
    let snapshot = StakeSnapshot {
        fetched_at_ms: 1_756_000_000_000,
        overview: PoolOverview {
            minted: U256::from(42u64),
            lock_amount: U256::from(10u64).pow(U256::from(18u64)),
            lock_period_minutes: 30,
        },
        position: Some(WalletPosition {
            balance: U256::from(5u64),
            allowance: U256::ZERO,
            allowed: false,
            is_locked: true,
            can_redeem: false,
            unlock_time_secs: 1_756_000_900,
        }),
    };

    let encoded = serde_json::to_vec(&snapshot).expect("serialize snapshot");
    let decoded: StakeSnapshot = serde_json::from_slice(&encoded).expect("deserialize snapshot");
    assert_eq!(decoded, snapshot);
}

pub mod domain;
pub mod orchestrator;
pub mod ports;
pub mod state_machine;

pub use domain::{LoadStep, PoolOverview, StakeSnapshot, TierKind, TxReceipt, WalletPosition};
pub use orchestrator::StakeOrchestrator;
pub use ports::{ClockPort, HeroNftPort, LockPoolPort, LpTokenPort, PortError};
pub use state_machine::{
    lock_available, lock_button_enabled, redeem_button_enabled, redeem_enabled,
    submission_transition, StateTransition, SubmissionAction, SubmissionPhase,
};

//! Bridge between the egui shell and the stake workspace crates.
//! This must remain the only shell-facing boundary for chain operations.

use alloy::primitives::{Address, B256};
use std::sync::Arc;

use lockmint_adapters::{
    ChainClient, HeroNftClient, LockPoolClient, LpTokenClient, StakeConfig, SystemClockAdapter,
};
use lockmint_core::{LoadStep, PortError, StakeOrchestrator, StakeSnapshot, TxReceipt};

type Orchestrator =
    StakeOrchestrator<LockPoolClient, LpTokenClient, HeroNftClient, SystemClockAdapter>;

#[derive(Clone)]
pub struct StakeBridge {
    orchestrator: Arc<Orchestrator>,
}

impl StakeBridge {
    /// Wires the three contract clients over one shared chain client.
    pub fn new(config: &StakeConfig) -> Result<Self, PortError> {
        let chain = ChainClient::from_config(config)?;
        let orchestrator = StakeOrchestrator::new(
            LockPoolClient::new(chain.clone(), config.lock_pool_address),
            LpTokenClient::new(chain.clone(), config.lp_token_address),
            HeroNftClient::new(chain, config.hero_nft_address),
            SystemClockAdapter,
        );
        Ok(Self {
            orchestrator: Arc::new(orchestrator),
        })
    }

    pub fn load_snapshot(
        &self,
        wallet: Option<Address>,
        on_step: &mut dyn FnMut(LoadStep),
    ) -> Result<StakeSnapshot, PortError> {
        self.orchestrator.load_snapshot(wallet, on_step)
    }

    pub fn refresh(&self, wallet: Option<Address>) -> Result<StakeSnapshot, PortError> {
        self.orchestrator.refresh(wallet)
    }

    pub fn lock(
        &self,
        wallet: Address,
        on_submit: &mut dyn FnMut(B256),
    ) -> Result<TxReceipt, PortError> {
        self.orchestrator.lock(wallet, on_submit)
    }

    pub fn redeem(
        &self,
        wallet: Address,
        on_submit: &mut dyn FnMut(B256),
    ) -> Result<TxReceipt, PortError> {
        self.orchestrator.redeem(wallet, on_submit)
    }
}

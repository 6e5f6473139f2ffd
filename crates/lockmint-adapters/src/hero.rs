use alloy::primitives::{Address, U256};

use lockmint_core::{HeroNftPort, PortError};

use crate::abi;
use crate::chain::ChainClient;

/// Client for the hero NFT collection; the page only reads the mint count.
#[derive(Debug, Clone)]
pub struct HeroNftClient {
    chain: ChainClient,
    address: Address,
}

impl HeroNftClient {
    pub fn new(chain: ChainClient, address: Address) -> Self {
        Self { chain, address }
    }
}

impl HeroNftPort for HeroNftClient {
    fn total_supply(&self) -> Result<U256, PortError> {
        let result = self
            .chain
            .call(self.address, &abi::encode_call("totalSupply()", &[]))?;
        abi::decode_u256(&result)
    }
}

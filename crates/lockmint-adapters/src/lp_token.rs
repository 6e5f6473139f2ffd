use alloy::primitives::{Address, U256};

use lockmint_core::{LpTokenPort, PortError};

use crate::abi;
use crate::chain::ChainClient;

/// ERC-20 client reduced to the two views the page reads.
#[derive(Debug, Clone)]
pub struct LpTokenClient {
    chain: ChainClient,
    address: Address,
}

impl LpTokenClient {
    pub fn new(chain: ChainClient, address: Address) -> Self {
        Self { chain, address }
    }
}

impl LpTokenPort for LpTokenClient {
    fn balance_of(&self, owner: Address) -> Result<U256, PortError> {
        let result = self
            .chain
            .call(self.address, &abi::encode_call("balanceOf(address)", &[owner]))?;
        abi::decode_u256(&result)
    }

    fn allowance(&self, owner: Address, spender: Address) -> Result<U256, PortError> {
        let result = self.chain.call(
            self.address,
            &abi::encode_call("allowance(address,address)", &[owner, spender]),
        )?;
        abi::decode_u256(&result)
    }
}

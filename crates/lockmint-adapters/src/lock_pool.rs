use alloy::primitives::{Address, B256, U256};

use lockmint_core::{LockPoolPort, PortError, TxReceipt};

use crate::abi;
use crate::chain::ChainClient;

/// Client for the lock pool contract. Reads are plain `eth_call`s; the two
/// writes submit through the node's wallet and block on the receipt.
#[derive(Debug, Clone)]
pub struct LockPoolClient {
    chain: ChainClient,
    address: Address,
}

impl LockPoolClient {
    pub fn new(chain: ChainClient, address: Address) -> Self {
        Self { chain, address }
    }

    fn submit(
        &self,
        wallet: Address,
        method_signature: &str,
        on_submit: &mut dyn FnMut(B256),
    ) -> Result<TxReceipt, PortError> {
        let data = abi::encode_call(method_signature, &[]);
        let tx_hash = self.chain.send_transaction(wallet, self.address, &data)?;
        on_submit(tx_hash);
        self.chain.wait_for_receipt(tx_hash)
    }
}

impl LockPoolPort for LockPoolClient {
    fn address(&self) -> Address {
        self.address
    }

    fn lock_amount(&self) -> Result<U256, PortError> {
        let result = self
            .chain
            .call(self.address, &abi::encode_call("lockAmount()", &[]))?;
        abi::decode_u256(&result)
    }

    fn lock_period_minutes(&self) -> Result<u64, PortError> {
        let result = self
            .chain
            .call(self.address, &abi::encode_call("lockPeriod()", &[]))?;
        abi::decode_u64(&result)
    }

    fn is_locked(&self, wallet: Address) -> Result<bool, PortError> {
        let result = self
            .chain
            .call(self.address, &abi::encode_call("isLocked(address)", &[wallet]))?;
        abi::decode_bool(&result)
    }

    fn can_redeem(&self, wallet: Address) -> Result<bool, PortError> {
        let result = self
            .chain
            .call(self.address, &abi::encode_call("canRedeem(address)", &[wallet]))?;
        abi::decode_bool(&result)
    }

    fn unlock_time(&self, wallet: Address) -> Result<u64, PortError> {
        let result = self
            .chain
            .call(self.address, &abi::encode_call("unlockTime(address)", &[wallet]))?;
        abi::decode_u64(&result)
    }

    fn lock(
        &self,
        wallet: Address,
        on_submit: &mut dyn FnMut(B256),
    ) -> Result<TxReceipt, PortError> {
        self.submit(wallet, "lock()", on_submit)
    }

    fn redeem(
        &self,
        wallet: Address,
        on_submit: &mut dyn FnMut(B256),
    ) -> Result<TxReceipt, PortError> {
        self.submit(wallet, "redeem()", on_submit)
    }
}

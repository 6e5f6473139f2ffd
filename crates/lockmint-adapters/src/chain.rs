use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use alloy::primitives::{keccak256, Address, B256, U256};
use serde_json::{json, Value};

use lockmint_core::{ClockPort, PortError, TxReceipt};

use crate::clock::SystemClockAdapter;
use crate::{abi, StakeConfig};

/// JSON-RPC transport shared by the contract clients.
///
/// With `LOCKMINT_RPC_URL` configured every request is POSTed to the node,
/// which is expected to manage the signing wallet (`eth_sendTransaction`).
/// Without a URL the client interprets the same calldata against an
/// in-memory pool, so the page stays fully operable offline.
#[derive(Debug, Clone)]
pub struct ChainClient {
    mode: ChainMode,
}

#[derive(Debug, Clone)]
enum ChainMode {
    Rpc(RpcRuntime),
    Deterministic(Arc<Mutex<SimulatedChain>>),
}

#[derive(Debug, Clone)]
struct RpcRuntime {
    url: String,
    client: reqwest::blocking::Client,
    receipt_poll_interval_ms: u64,
    receipt_timeout_ms: u64,
}

impl ChainClient {
    pub fn from_config(config: &StakeConfig) -> Result<Self, PortError> {
        let mode = match config.rpc_url {
            Some(ref url) => {
                let timeout = Duration::from_millis(config.request_timeout_ms);
                let client = reqwest::blocking::Client::builder()
                    .timeout(timeout)
                    .build()
                    .map_err(|e| PortError::Transport(format!("failed to build rpc client: {e}")))?;
                ChainMode::Rpc(RpcRuntime {
                    url: url.clone(),
                    client,
                    receipt_poll_interval_ms: config.receipt_poll_interval_ms,
                    receipt_timeout_ms: config.receipt_timeout_ms,
                })
            }
            None => ChainMode::Deterministic(Arc::new(Mutex::new(SimulatedChain::from_config(
                config,
            )))),
        };
        Ok(Self { mode })
    }

    /// `eth_call` against `to` with `0x`-prefixed calldata, returning the
    /// raw hex result.
    pub fn call(&self, to: Address, data: &str) -> Result<String, PortError> {
        match &self.mode {
            ChainMode::Rpc(runtime) => {
                let params = json!([{"to": to.to_string(), "data": data}, "latest"]);
                let result = rpc_call(runtime, "eth_call", params)?;
                result
                    .as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| PortError::Transport("eth_call must return hex string".to_owned()))
            }
            ChainMode::Deterministic(sim) => {
                let bytes = decode_hex(data)?;
                let mut sim = sim
                    .lock()
                    .map_err(|e| PortError::Transport(format!("simulated chain lock poisoned: {e}")))?;
                sim.call(to, &bytes)
            }
        }
    }

    /// Submits a wallet-signed transaction and returns its hash. The node
    /// rejects transactions that would revert at the gas-estimation step,
    /// which surfaces here as [`PortError::Reverted`].
    pub fn send_transaction(
        &self,
        from: Address,
        to: Address,
        data: &str,
    ) -> Result<B256, PortError> {
        match &self.mode {
            ChainMode::Rpc(runtime) => {
                let params = json!([{
                    "from": from.to_string(),
                    "to": to.to_string(),
                    "data": data,
                }]);
                let result = rpc_call(runtime, "eth_sendTransaction", params)?;
                let hash = result.as_str().ok_or_else(|| {
                    PortError::Transport("eth_sendTransaction must return tx hash".to_owned())
                })?;
                hash.parse()
                    .map_err(|e| PortError::Validation(format!("invalid tx hash: {e}")))
            }
            ChainMode::Deterministic(sim) => {
                let bytes = decode_hex(data)?;
                let mut sim = sim
                    .lock()
                    .map_err(|e| PortError::Transport(format!("simulated chain lock poisoned: {e}")))?;
                sim.send_transaction(from, to, &bytes)
            }
        }
    }

    /// Test and demo control: rewrites the simulated pool's lock period.
    pub fn debug_set_lock_period(&self, minutes: u64) -> Result<(), PortError> {
        match &self.mode {
            ChainMode::Deterministic(sim) => {
                let mut sim = sim
                    .lock()
                    .map_err(|e| PortError::Transport(format!("simulated chain lock poisoned: {e}")))?;
                sim.lock_period_minutes = minutes;
                Ok(())
            }
            ChainMode::Rpc(_) => Err(PortError::NotImplemented(
                "debug controls require deterministic mode",
            )),
        }
    }

    /// Blocks until the transaction settles, polling the node at the
    /// configured interval. A receipt with status zero is an error, not a
    /// result.
    pub fn wait_for_receipt(&self, tx_hash: B256) -> Result<TxReceipt, PortError> {
        match &self.mode {
            ChainMode::Rpc(runtime) => {
                let deadline = Instant::now() + Duration::from_millis(runtime.receipt_timeout_ms);
                loop {
                    if let Some(receipt) = fetch_receipt(runtime, tx_hash)? {
                        if receipt.success {
                            return Ok(receipt);
                        }
                        return Err(PortError::Reverted(format!(
                            "{tx_hash} settled with status zero in block {}",
                            receipt.block_number
                        )));
                    }
                    if Instant::now() >= deadline {
                        return Err(PortError::Timeout(format!(
                            "no receipt for {tx_hash} after {}ms",
                            runtime.receipt_timeout_ms
                        )));
                    }
                    std::thread::sleep(Duration::from_millis(runtime.receipt_poll_interval_ms));
                }
            }
            ChainMode::Deterministic(sim) => {
                let sim = sim
                    .lock()
                    .map_err(|e| PortError::Transport(format!("simulated chain lock poisoned: {e}")))?;
                sim.receipts
                    .get(&tx_hash)
                    .copied()
                    .ok_or_else(|| PortError::Validation(format!("unknown transaction {tx_hash}")))
            }
        }
    }
}

fn rpc_call(runtime: &RpcRuntime, method: &str, params: Value) -> Result<Value, PortError> {
    let payload = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    });
    let response = runtime
        .client
        .post(&runtime.url)
        .json(&payload)
        .send()
        .map_err(|e| PortError::Transport(format!("rpc request failed: {e}")))?;
    let status = response.status();
    let body: Value = response
        .json()
        .map_err(|e| PortError::Transport(format!("rpc json decode failed: {e}")))?;
    if !status.is_success() {
        return Err(PortError::Transport(format!("rpc status {status}: {body}")));
    }
    if let Some(err) = body.get("error") {
        return Err(classify_rpc_error(err));
    }
    body.get("result")
        .cloned()
        .ok_or_else(|| PortError::Transport("rpc response missing result".to_owned()))
}

/// Maps a JSON-RPC error object onto the port error taxonomy. 4001 is the
/// EIP-1193 user-rejection code; reverts come back as -32xxx with a message
/// the node composes.
fn classify_rpc_error(err: &Value) -> PortError {
    let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown rpc error")
        .to_owned();
    if code == 4001 {
        return PortError::Rejected(message);
    }
    if message.to_ascii_lowercase().contains("revert") {
        return PortError::Reverted(message);
    }
    PortError::Transport(format!("rpc error {code}: {message}"))
}

fn fetch_receipt(runtime: &RpcRuntime, tx_hash: B256) -> Result<Option<TxReceipt>, PortError> {
    let result = rpc_call(
        runtime,
        "eth_getTransactionReceipt",
        json!([tx_hash.to_string()]),
    )?;
    if result.is_null() {
        return Ok(None);
    }
    let success = matches!(
        result.get("status").and_then(Value::as_str),
        Some("0x1") | Some("0x01")
    );
    let block_number = match result.get("blockNumber").and_then(Value::as_str) {
        Some(raw) => parse_hex_u64(raw)?,
        None => 0,
    };
    Ok(Some(TxReceipt {
        tx_hash,
        block_number,
        success,
    }))
}

fn parse_hex_u64(raw: &str) -> Result<u64, PortError> {
    let digits = raw.trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(digits, 16)
        .map_err(|e| PortError::Validation(format!("invalid hex quantity '{raw}': {e}")))
}

fn decode_hex(data: &str) -> Result<Vec<u8>, PortError> {
    alloy::hex::decode(data)
        .map_err(|e| PortError::Validation(format!("invalid calldata hex: {e}")))
}

/// In-memory stand-in for the pool, token and hero contracts. Wallets are
/// funded on first contact so the offline demo works with any address.
#[derive(Debug)]
struct SimulatedChain {
    clock: SystemClockAdapter,
    pool: Address,
    token: Address,
    hero: Address,
    lock_amount: U256,
    lock_period_minutes: u64,
    minted: U256,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
    locks: HashMap<Address, SimLock>,
    receipts: HashMap<B256, TxReceipt>,
    next_block: u64,
    nonce: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct SimLock {
    active: bool,
    unlock_time_secs: u64,
}

impl SimulatedChain {
    fn from_config(config: &StakeConfig) -> Self {
        let mut sim = Self {
            clock: SystemClockAdapter,
            pool: config.lock_pool_address,
            token: config.lp_token_address,
            hero: config.hero_nft_address,
            lock_amount: U256::from(10u64).pow(U256::from(u32::from(config.token_decimals))),
            lock_period_minutes: 30,
            minted: U256::ZERO,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            locks: HashMap::new(),
            receipts: HashMap::new(),
            next_block: 1,
            nonce: 0,
        };
        if let Some(wallet) = config.wallet {
            sim.ensure_seeded(wallet);
        }
        sim
    }

    fn call(&mut self, to: Address, data: &[u8]) -> Result<String, PortError> {
        let sel = read_selector(data)?;

        if to == self.hero && sel == abi::selector("totalSupply()") {
            return Ok(encode_word(self.minted));
        }

        if to == self.token {
            if sel == abi::selector("balanceOf(address)") {
                let owner = word_address(data, 0)?;
                self.ensure_seeded(owner);
                return Ok(encode_word(self.balance_of(owner)));
            }
            if sel == abi::selector("allowance(address,address)") {
                let owner = word_address(data, 0)?;
                let spender = word_address(data, 1)?;
                self.ensure_seeded(owner);
                let allowance = self
                    .allowances
                    .get(&(owner, spender))
                    .copied()
                    .unwrap_or(U256::ZERO);
                return Ok(encode_word(allowance));
            }
        }

        if to == self.pool {
            if sel == abi::selector("lockAmount()") {
                return Ok(encode_word(self.lock_amount));
            }
            if sel == abi::selector("lockPeriod()") {
                return Ok(encode_word(U256::from(self.lock_period_minutes)));
            }
            if sel == abi::selector("isLocked(address)") {
                let wallet = word_address(data, 0)?;
                return Ok(encode_bool_word(self.lock_of(wallet).active));
            }
            if sel == abi::selector("canRedeem(address)") {
                let wallet = word_address(data, 0)?;
                let lock = self.lock_of(wallet);
                let matured = lock.active && self.now_secs()? >= lock.unlock_time_secs;
                return Ok(encode_bool_word(matured));
            }
            if sel == abi::selector("unlockTime(address)") {
                let wallet = word_address(data, 0)?;
                return Ok(encode_word(U256::from(self.lock_of(wallet).unlock_time_secs)));
            }
        }

        Err(PortError::Validation(format!(
            "no deterministic handler for call to {to}"
        )))
    }

    fn send_transaction(
        &mut self,
        from: Address,
        to: Address,
        data: &[u8],
    ) -> Result<B256, PortError> {
        let sel = read_selector(data)?;
        if to != self.pool {
            return Err(PortError::Validation(format!(
                "no deterministic handler for transaction to {to}"
            )));
        }
        self.ensure_seeded(from);

        if sel == abi::selector("lock()") {
            self.execute_lock(from)?;
        } else if sel == abi::selector("redeem()") {
            self.execute_redeem(from)?;
        } else {
            return Err(PortError::Validation(
                "unknown pool method in deterministic mode".to_owned(),
            ));
        }

        Ok(self.record_receipt(from, to, data))
    }

    fn execute_lock(&mut self, from: Address) -> Result<(), PortError> {
        if self.lock_of(from).active {
            return Err(PortError::Reverted(
                "execution reverted: already locked".to_owned(),
            ));
        }
        let balance = self.balance_of(from);
        if balance < self.lock_amount {
            return Err(PortError::Reverted(
                "execution reverted: insufficient LP balance".to_owned(),
            ));
        }
        let allowance = self
            .allowances
            .get(&(from, self.pool))
            .copied()
            .unwrap_or(U256::ZERO);
        if allowance < self.lock_amount {
            return Err(PortError::Reverted(
                "execution reverted: allowance below lock amount".to_owned(),
            ));
        }

        self.balances.insert(from, balance - self.lock_amount);
        if allowance != U256::MAX {
            self.allowances
                .insert((from, self.pool), allowance - self.lock_amount);
        }
        let unlock_time_secs = self.now_secs()? + self.lock_period_minutes * 60;
        self.locks.insert(
            from,
            SimLock {
                active: true,
                unlock_time_secs,
            },
        );
        self.minted += U256::from(1u64);
        Ok(())
    }

    fn execute_redeem(&mut self, from: Address) -> Result<(), PortError> {
        let lock = self.lock_of(from);
        if !lock.active {
            return Err(PortError::Reverted(
                "execution reverted: nothing locked".to_owned(),
            ));
        }
        if self.now_secs()? < lock.unlock_time_secs {
            return Err(PortError::Reverted(
                "execution reverted: lock period not over".to_owned(),
            ));
        }

        let balance = self.balance_of(from);
        self.balances.insert(from, balance + self.lock_amount);
        self.locks.insert(
            from,
            SimLock {
                active: false,
                unlock_time_secs: lock.unlock_time_secs,
            },
        );
        Ok(())
    }

    fn record_receipt(&mut self, from: Address, to: Address, data: &[u8]) -> B256 {
        let mut seed = Vec::new();
        seed.extend_from_slice(from.as_slice());
        seed.extend_from_slice(to.as_slice());
        seed.extend_from_slice(data);
        seed.extend_from_slice(&self.nonce.to_be_bytes());
        self.nonce += 1;

        let tx_hash = keccak256(seed);
        let block_number = self.next_block;
        self.next_block += 1;
        self.receipts.insert(
            tx_hash,
            TxReceipt {
                tx_hash,
                block_number,
                success: true,
            },
        );
        tx_hash
    }

    fn ensure_seeded(&mut self, owner: Address) {
        if !self.balances.contains_key(&owner) {
            self.balances
                .insert(owner, self.lock_amount.saturating_mul(U256::from(10u64)));
            self.allowances.insert((owner, self.pool), U256::MAX);
        }
    }

    fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).copied().unwrap_or(U256::ZERO)
    }

    fn lock_of(&self, wallet: Address) -> SimLock {
        self.locks.get(&wallet).copied().unwrap_or_default()
    }

    fn now_secs(&self) -> Result<u64, PortError> {
        Ok(self.clock.now_ms()? / 1_000)
    }
}

fn read_selector(data: &[u8]) -> Result<[u8; 4], PortError> {
    if data.len() < 4 {
        return Err(PortError::Validation(
            "calldata shorter than a selector".to_owned(),
        ));
    }
    let mut sel = [0u8; 4];
    sel.copy_from_slice(&data[0..4]);
    Ok(sel)
}

fn word_address(data: &[u8], index: usize) -> Result<Address, PortError> {
    let start = 4 + index * 32;
    let end = start + 32;
    if data.len() < end {
        return Err(PortError::Validation(format!(
            "calldata argument {index} out of range"
        )));
    }
    Ok(Address::from_slice(&data[start + 12..end]))
}

fn encode_word(value: U256) -> String {
    format!("0x{}", alloy::hex::encode(value.to_be_bytes::<32>()))
}

fn encode_bool_word(value: bool) -> String {
    encode_word(U256::from(u64::from(value)))
}

use std::fmt;
use std::str::FromStr;

use alloy::primitives::Address;
use lockmint_core::{PortError, TierKind};

/// Deployment knobs for the stake page, resolved from `LOCKMINT_*`
/// environment variables over built-in defaults.
///
/// Without `LOCKMINT_RPC_URL` the chain client runs in deterministic mode
/// against a simulated pool, which keeps the page usable offline.
#[derive(Debug, Clone)]
pub struct StakeConfig {
    pub rpc_url: Option<String>,
    /// Explorer key for outbound links ("bsc", "ethereum", ...).
    pub chain: String,
    pub wallet: Option<Address>,
    pub initial_tier: TierKind,
    pub lock_pool_address: Address,
    pub lp_token_address: Address,
    pub hero_nft_address: Address,
    pub token_symbol: String,
    pub token_decimals: u8,
    pub collection_name: String,
    pub max_mint_supply: u64,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    pub receipt_poll_interval_ms: u64,
    pub receipt_timeout_ms: u64,
}

impl Default for StakeConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            chain: "bsc".to_owned(),
            wallet: None,
            initial_tier: TierKind::Silver,
            lock_pool_address: Address::with_last_byte(0x0a),
            lp_token_address: Address::with_last_byte(0x0b),
            hero_nft_address: Address::with_last_byte(0x0c),
            token_symbol: "LOCK-LP".to_owned(),
            token_decimals: 18,
            collection_name: "LockHero".to_owned(),
            max_mint_supply: 1_000,
            poll_interval_ms: 5_000,
            request_timeout_ms: 15_000,
            receipt_poll_interval_ms: 3_000,
            receipt_timeout_ms: 180_000,
        }
    }
}

impl StakeConfig {
    pub fn from_env() -> Result<Self, PortError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration through `lookup`. Missing or blank keys
    /// fall back to the defaults; present-but-malformed values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PortError> {
        let mut config = Self::default();

        if let Some(url) = non_blank(lookup("LOCKMINT_RPC_URL")) {
            config.rpc_url = Some(url);
        }
        if let Some(chain) = non_blank(lookup("LOCKMINT_CHAIN")) {
            config.chain = chain.to_ascii_lowercase();
        }
        if let Some(raw) = non_blank(lookup("LOCKMINT_WALLET")) {
            config.wallet = Some(parse_var(&raw, "LOCKMINT_WALLET")?);
        }
        if let Some(raw) = non_blank(lookup("LOCKMINT_TIER")) {
            config.initial_tier = parse_var(&raw, "LOCKMINT_TIER")?;
        }
        if let Some(raw) = non_blank(lookup("LOCKMINT_LOCK_POOL")) {
            config.lock_pool_address = parse_var(&raw, "LOCKMINT_LOCK_POOL")?;
        }
        if let Some(raw) = non_blank(lookup("LOCKMINT_LP_TOKEN")) {
            config.lp_token_address = parse_var(&raw, "LOCKMINT_LP_TOKEN")?;
        }
        if let Some(raw) = non_blank(lookup("LOCKMINT_HERO_NFT")) {
            config.hero_nft_address = parse_var(&raw, "LOCKMINT_HERO_NFT")?;
        }
        if let Some(symbol) = non_blank(lookup("LOCKMINT_TOKEN_SYMBOL")) {
            config.token_symbol = symbol;
        }
        if let Some(raw) = non_blank(lookup("LOCKMINT_TOKEN_DECIMALS")) {
            config.token_decimals = parse_var(&raw, "LOCKMINT_TOKEN_DECIMALS")?;
        }
        if let Some(name) = non_blank(lookup("LOCKMINT_COLLECTION_NAME")) {
            config.collection_name = name;
        }
        if let Some(raw) = non_blank(lookup("LOCKMINT_MAX_SUPPLY")) {
            config.max_mint_supply = parse_var(&raw, "LOCKMINT_MAX_SUPPLY")?;
        }
        if let Some(raw) = non_blank(lookup("LOCKMINT_POLL_INTERVAL_MS")) {
            config.poll_interval_ms = parse_var(&raw, "LOCKMINT_POLL_INTERVAL_MS")?;
        }
        if let Some(raw) = non_blank(lookup("LOCKMINT_REQUEST_TIMEOUT_MS")) {
            config.request_timeout_ms = parse_var(&raw, "LOCKMINT_REQUEST_TIMEOUT_MS")?;
        }
        if let Some(raw) = non_blank(lookup("LOCKMINT_RECEIPT_POLL_INTERVAL_MS")) {
            config.receipt_poll_interval_ms = parse_var(&raw, "LOCKMINT_RECEIPT_POLL_INTERVAL_MS")?;
        }
        if let Some(raw) = non_blank(lookup("LOCKMINT_RECEIPT_TIMEOUT_MS")) {
            config.receipt_timeout_ms = parse_var(&raw, "LOCKMINT_RECEIPT_TIMEOUT_MS")?;
        }

        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn parse_var<T>(raw: &str, key: &str) -> Result<T, PortError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| PortError::Validation(format!("invalid {key}: {e}")))
}

use alloy::primitives::{keccak256, Address, U256};

use lockmint_core::PortError;

/// First four bytes of the keccak-256 hash of a canonical method signature.
pub fn selector(method_signature: &str) -> [u8; 4] {
    let hash = keccak256(method_signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_slice()[0..4]);
    selector
}

/// Builds `0x`-prefixed calldata for a method whose inputs are all
/// `address`. The pool and token surface this page talks to never takes any
/// other argument type, so words are laid out directly instead of going
/// through a dynamic ABI encoder.
pub fn encode_call(method_signature: &str, args: &[Address]) -> String {
    let mut data = Vec::with_capacity(4 + args.len() * 32);
    data.extend_from_slice(&selector(method_signature));
    for arg in args {
        data.extend_from_slice(&address_word(arg));
    }
    format!("0x{}", alloy::hex::encode(data))
}

fn address_word(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_slice());
    word
}

/// Decodes a single-word `eth_call` return into a `U256`.
pub fn decode_u256(result: &str) -> Result<U256, PortError> {
    let digits = result.trim().trim_start_matches("0x");
    if digits.is_empty() {
        return Err(PortError::Validation(
            "empty call result, is the contract deployed?".to_owned(),
        ));
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| PortError::Validation(format!("invalid call result '{result}': {e}")))
}

pub fn decode_bool(result: &str) -> Result<bool, PortError> {
    Ok(decode_u256(result)? != U256::ZERO)
}

pub fn decode_u64(result: &str) -> Result<u64, PortError> {
    let value = decode_u256(result)?;
    u64::try_from(value)
        .map_err(|_| PortError::Validation(format!("call result does not fit in u64: {value}")))
}

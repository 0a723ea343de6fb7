//! TRON address parsing (base58check and `0x41` hex) and the SR candidate address.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const ADDRESS_HEX_PREFIX: u8 = 0x41;
pub const ADDRESS_BASE58_PREFIX: char = 'T';
pub const ADDRESS_HEX_LEN: usize = 42;
pub const ADDRESS_BYTES_LEN: usize = 21;
pub const ADDRESS_BASE58_LEN: usize = 34;

/// Rendered in place of an address for a candidate that does not exist on chain yet.
pub const HYPOTHETICAL_ADDRESS: &str = "N/A";

/// TRON address, 21 bytes: 0x41 prefix + 20 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TronAddress {
    inner: [u8; ADDRESS_BYTES_LEN],
}

impl TronAddress {
    fn from_prefixed_bytes(data: Vec<u8>) -> Result<Self, String> {
        if data.len() != ADDRESS_BYTES_LEN || data[0] != ADDRESS_HEX_PREFIX {
            return Err(format!(
                "Invalid address: expected {} bytes with prefix 0x{:x}",
                ADDRESS_BYTES_LEN, ADDRESS_HEX_PREFIX
            ));
        }
        let inner = data
            .try_into()
            .map_err(|_| "Failed to convert address bytes to array".to_string())?;
        Ok(TronAddress { inner })
    }

    pub fn from_base58(s: &str) -> Result<Self, String> {
        let data = bs58::decode(s)
            .with_check(None)
            .into_vec()
            .map_err(|e| format!("Invalid base58check address: {}", e))?;
        Self::from_prefixed_bytes(data)
    }

    /// Hex with or without `0x`, any case.
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let data = hex::decode(s).map_err(|e| format!("Invalid hex address: {}", e))?;
        Self::from_prefixed_bytes(data)
    }

    pub fn to_base58(&self) -> String { bs58::encode(self.inner).with_check().into_string() }

    /// Lowercase hex without `0x`. Used as the canonical form when comparing addresses.
    pub fn to_hex(&self) -> String { hex::encode(self.inner) }
}

impl fmt::Display for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.to_base58()) }
}

impl fmt::Debug for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TronAddress({} / {})", self.to_base58(), self.to_hex())
    }
}

impl FromStr for TronAddress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == ADDRESS_BASE58_LEN && s.starts_with(ADDRESS_BASE58_PREFIX) {
            return Self::from_base58(s);
        }

        let hex_body = s.strip_prefix("0x").unwrap_or(s);
        if hex_body.len() == ADDRESS_HEX_LEN && hex_body.starts_with("41") {
            return Self::from_hex(hex_body);
        }

        Err(format!(
            "Invalid TRON address '{}': must be Base58 (34 chars starting with 'T') or hex (42 chars starting with '41' or '0x41')",
            s
        ))
    }
}

/// Address of an entry in the SR reward list.
/// A simulated candidate that is not registered on chain has no address at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CandidateAddress {
    Existing(String),
    Hypothetical,
}

impl CandidateAddress {
    pub fn is_hypothetical(&self) -> bool { matches!(self, CandidateAddress::Hypothetical) }

    pub fn as_existing(&self) -> Option<&str> {
        match self {
            CandidateAddress::Existing(address) => Some(address),
            CandidateAddress::Hypothetical => None,
        }
    }
}

impl fmt::Display for CandidateAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateAddress::Existing(address) => f.write_str(address),
            CandidateAddress::Hypothetical => f.write_str(HYPOTHETICAL_ADDRESS),
        }
    }
}

impl Serialize for CandidateAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

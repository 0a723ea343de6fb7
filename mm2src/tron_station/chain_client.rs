//! Read-only view of a TRON full node that the calculator depends on.
//!
//! Transport, endpoints and retries are the implementor's business. The wire types mirror the
//! TronGrid JSON responses of `getaccount`, `getaccountresource`, `getchainparameters` and
//! `listwitnesses`.

use crate::address::TronAddress;
use async_trait::async_trait;
use derive_more::Display;
use std::collections::HashMap;
use std::str::FromStr;

pub type ChainClientResult<T> = Result<T, ChainClientError>;

#[derive(Clone, Debug, Display, PartialEq, Serialize)]
#[serde(tag = "error_type", content = "error_data")]
pub enum ChainClientError {
    #[display(fmt = "Transport error: {}", _0)]
    Transport(String),
    #[display(fmt = "Invalid response: {}", _0)]
    InvalidResponse(String),
}

impl From<serde_json::Error> for ChainClientError {
    fn from(e: serde_json::Error) -> Self { ChainClientError::InvalidResponse(e.to_string()) }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TronAccount {
    #[serde(default)]
    pub balance: Option<i64>,
    /// Hex encoded bytes of the account name.
    #[serde(default)]
    pub account_name: Option<String>,
}

impl TronAccount {
    pub fn balance_or_zero(&self) -> i64 { self.balance.unwrap_or_default() }
}

/// Resource name to value, e.g. `EnergyLimit`, `freeNetUsed`, `TotalEnergyWeight`.
/// The node omits zero valued fields, so every read goes through [`AccountResources::get_or_zero`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct AccountResources(HashMap<String, i64>);

impl AccountResources {
    pub fn get_or_zero(&self, name: &str) -> i64 { self.0.get(name).copied().unwrap_or_default() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<K: Into<String>> FromIterator<(K, i64)> for AccountResources {
    fn from_iter<T: IntoIterator<Item = (K, i64)>>(iter: T) -> Self {
        AccountResources(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChainParameter {
    pub key: String,
    /// Absent when the parameter is zero.
    #[serde(default)]
    pub value: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ChainParameters {
    #[serde(rename = "chainParameter", default)]
    pub chain_parameter: Vec<ChainParameter>,
}

impl ChainParameters {
    /// First value recorded under `key`.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.chain_parameter
            .iter()
            .find(|param| param.key == key)
            .and_then(|param| param.value)
    }

    pub fn get_or(&self, key: &str, default: i64) -> i64 { self.get(key).unwrap_or(default) }
}

impl FromIterator<ChainParameter> for ChainParameters {
    fn from_iter<T: IntoIterator<Item = ChainParameter>>(iter: T) -> Self {
        ChainParameters {
            chain_parameter: iter.into_iter().collect(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SuperRepresentative {
    pub address: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "voteCount", default)]
    pub vote_count: i64,
    #[serde(default)]
    pub account_name: Option<String>,
}

#[async_trait]
pub trait TronChainClient: Send + Sync {
    async fn get_account(&self, address: &str) -> ChainClientResult<TronAccount>;

    async fn get_account_resources(&self, address: &str) -> ChainClientResult<AccountResources>;

    async fn get_chain_parameters(&self) -> ChainClientResult<ChainParameters>;

    async fn list_super_representatives(&self) -> ChainClientResult<Vec<SuperRepresentative>>;

    fn is_address_valid(&self, address: &str) -> bool { TronAddress::from_str(address).is_ok() }

    /// Lowercase hex form of a base58 or hex address. Unparsable input is returned as is,
    /// so it simply won't match any known address.
    fn to_canonical_address(&self, address: &str) -> String {
        match TronAddress::from_str(address) {
            Ok(address) => address.to_hex(),
            Err(_) => address.to_string(),
        }
    }

    /// Decodes a hex string of UTF-8 bytes, as used for `account_name`.
    fn decode_bytes_to_string(&self, hex_bytes: &str) -> Option<String> {
        let bytes = hex::decode(hex_bytes).ok()?;
        String::from_utf8(bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::for_tests::TestChainClient;

    #[test]
    fn test_chain_parameters_from_node_json() {
        let params: ChainParameters = serde_json::from_value(json!({
            "chainParameter": [
                {"key": "getMaintenanceTimeInterval", "value": 21600000},
                {"key": "getAllowCreationOfContracts"},
                {"key": "getEnergyFee", "value": 420}
            ]
        }))
        .unwrap();
        assert_eq!(params.get("getEnergyFee"), Some(420));
        assert_eq!(params.get("getAllowCreationOfContracts"), None);
        assert_eq!(params.get_or("getTotalEnergyLimit", 7), 7);
    }

    #[test]
    fn test_account_resources_default_to_zero() {
        let resources: AccountResources = serde_json::from_value(json!({
            "freeNetLimit": 600,
            "TotalEnergyWeight": 19283746
        }))
        .unwrap();
        assert_eq!(resources.get_or_zero("freeNetLimit"), 600);
        assert_eq!(resources.get_or_zero("NetUsed"), 0);
        assert!(!resources.is_empty());
    }

    #[test]
    fn test_super_representative_from_node_json() {
        let sr: SuperRepresentative = serde_json::from_value(json!({
            "address": "41f16412b9a17ee9408646e2a21e16478f72ed1e95",
            "voteCount": 3124512,
            "url": "https://example.org",
            "totalProduced": 1,
            "isJobs": true
        }))
        .unwrap();
        assert_eq!(sr.vote_count, 3124512);
        assert_eq!(sr.account_name, None);
    }

    #[test]
    fn test_provided_address_helpers() {
        let client = TestChainClient::default();
        assert!(client.is_address_valid("TNPeeaaFB7K9cmo4uQpcU32zGK8G1NYqeL"));
        assert!(!client.is_address_valid("TNPeeaaFB7K9cmo4uQpcU32zGK8G1NYqeX"));
        assert_eq!(
            client.to_canonical_address("TNPeeaaFB7K9cmo4uQpcU32zGK8G1NYqeL"),
            "418840e6c55b9ada326d211d818c34a994aeced808"
        );
        assert_eq!(client.to_canonical_address("garbage"), "garbage");
        assert_eq!(client.decode_bytes_to_string("54726f6e"), Some("Tron".to_string()));
        assert_eq!(client.decode_bytes_to_string("5"), None);
    }
}

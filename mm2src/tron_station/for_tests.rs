use crate::chain_client::{AccountResources, ChainClientError, ChainClientResult, ChainParameter, ChainParameters,
                          SuperRepresentative, TronAccount, TronChainClient};
use crate::conf::{Network, TronStationConf};
use crate::TronStation;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const MAINNET_RESOURCE_ADDRESS_HEX: &str = "4142232ff1bddd5f01c948c9a661e43308648cfeb2";
pub const SHASTA_RESOURCE_ADDRESS_HEX: &str = "41928c9af0651632157ef27a2cf17ca72c575a4d21";
/// `418840e6c55b9ada326d211d818c34a994aeced808` in base58.
pub const USER_ADDRESS: &str = "TNPeeaaFB7K9cmo4uQpcU32zGK8G1NYqeL";

/// Distinct valid hex address for fixtures.
pub fn test_address(index: u32) -> String { format!("41{:040x}", index) }

pub fn test_sr(index: u32, vote_count: i64) -> SuperRepresentative {
    SuperRepresentative {
        address: test_address(index),
        url: format!("https://sr{}.example.org", index),
        vote_count,
        account_name: None,
    }
}

/// In-memory node. Unknown accounts answer with an empty account, like the real node does.
#[derive(Default)]
pub struct TestChainClient {
    accounts: HashMap<String, TronAccount>,
    resources: HashMap<String, AccountResources>,
    chain_parameters: ChainParameters,
    super_representatives: Vec<SuperRepresentative>,
    failure: Option<ChainClientError>,
    pub account_requests: AtomicUsize,
}

impl TestChainClient {
    pub fn with_chain_parameters(mut self, params: &[(&str, i64)]) -> Self {
        self.chain_parameters = params
            .iter()
            .map(|(key, value)| ChainParameter {
                key: key.to_string(),
                value: Some(*value),
            })
            .collect();
        self
    }

    pub fn with_resources(mut self, address: &str, resources: &[(&str, i64)]) -> Self {
        let address = self.to_canonical_address(address);
        self.resources
            .insert(address, resources.iter().map(|(k, v)| (*k, *v)).collect());
        self
    }

    pub fn with_account(mut self, address: &str, balance: Option<i64>, account_name: Option<&str>) -> Self {
        let address = self.to_canonical_address(address);
        let account = TronAccount {
            balance,
            account_name: account_name.map(hex::encode),
        };
        self.accounts.insert(address, account);
        self
    }

    pub fn with_super_representatives(mut self, srs: Vec<SuperRepresentative>) -> Self {
        self.super_representatives = srs;
        self
    }

    pub fn failing(mut self, error: ChainClientError) -> Self {
        self.failure = Some(error);
        self
    }

    fn check_failure(&self) -> ChainClientResult<()> {
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    pub fn into_station(self, network: Network) -> TronStation<Self> {
        TronStation::new(self, TronStationConf::new(network)).unwrap()
    }
}

#[async_trait]
impl TronChainClient for TestChainClient {
    async fn get_account(&self, address: &str) -> ChainClientResult<TronAccount> {
        self.check_failure()?;
        self.account_requests.fetch_add(1, Ordering::Relaxed);
        let address = self.to_canonical_address(address);
        Ok(self.accounts.get(&address).cloned().unwrap_or_default())
    }

    async fn get_account_resources(&self, address: &str) -> ChainClientResult<AccountResources> {
        self.check_failure()?;
        let address = self.to_canonical_address(address);
        Ok(self.resources.get(&address).cloned().unwrap_or_default())
    }

    async fn get_chain_parameters(&self) -> ChainClientResult<ChainParameters> {
        self.check_failure()?;
        Ok(self.chain_parameters.clone())
    }

    async fn list_super_representatives(&self) -> ChainClientResult<Vec<SuperRepresentative>> {
        self.check_failure()?;
        Ok(self.super_representatives.clone())
    }
}

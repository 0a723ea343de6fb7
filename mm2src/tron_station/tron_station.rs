//! Resource economics of the TRON account model: energy and bandwidth obtained by freezing TRX,
//! the energy a fee limit can buy, and the super representative (SR) vote reward distribution.
//!
//! [`TronStation`] holds no state besides its configuration. Every call reads fresh chain
//! parameters and resources through a [`TronChainClient`], since they can change between blocks.

#[macro_use] extern crate log;
#[macro_use] extern crate serde_derive;
#[cfg_attr(test, macro_use)] extern crate serde_json;

pub mod address;
pub mod bandwidth;
pub mod chain_client;
pub mod conf;
pub mod energy;
pub mod errors;
pub mod rpc;
pub mod sr_reward;

#[cfg(test)] mod for_tests;

pub use address::{CandidateAddress, TronAddress};
pub use bandwidth::{AccountBandwidth, FrozenBandwidth};
pub use chain_client::{AccountResources, ChainClientError, ChainClientResult, ChainParameter, ChainParameters,
                       SuperRepresentative, TronAccount, TronChainClient};
pub use conf::{Network, TronStationConf};
pub use energy::MaxEnergyLimit;
pub use errors::{TronStationError, TronStationResult};
pub use rpc::dispatch_tron_station_rpc;
pub use sr_reward::{SrCandidate, SrRewardEstimate, SrRole, SrVoteRewardList};

/// Sun per TRX.
pub const SUN_PER_TRX: f64 = 1_000_000.;

pub struct TronStation<C> {
    client: C,
    network: Network,
    /// Hex address used to query network-wide resource totals.
    resource_address: String,
}

impl<C: TronChainClient> TronStation<C> {
    pub fn new(client: C, conf: TronStationConf) -> TronStationResult<Self> {
        let resource_address = conf.resource_address()?;
        if !client.is_address_valid(&resource_address) {
            return Err(TronStationError::InvalidConfig(format!(
                "Invalid resource address '{}'",
                resource_address
            )));
        }
        Ok(TronStation {
            resource_address: client.to_canonical_address(&resource_address),
            client,
            network: conf.network,
        })
    }

    pub fn client(&self) -> &C { &self.client }

    pub fn network(&self) -> Network { self.network }

    pub fn is_main(&self) -> bool { self.network.is_main() }

    pub(crate) fn validate_address(&self, address: &str) -> TronStationResult<()> {
        if self.client.is_address_valid(address) {
            Ok(())
        } else {
            Err(TronStationError::InvalidArgument(format!("Invalid address '{}'", address)))
        }
    }

    /// Resources of `address`. An empty answer means the node gave us nothing to work with.
    pub(crate) async fn account_resources(&self, address: &str) -> TronStationResult<AccountResources> {
        let resources = self.client.get_account_resources(address).await?;
        if resources.is_empty() {
            return Err(TronStationError::UpstreamDataError(format!(
                "No resources returned for '{}'",
                address
            )));
        }
        Ok(resources)
    }

    /// Network-wide totals such as `TotalEnergyWeight` and `TotalNetLimit`.
    pub(crate) async fn network_resources(&self) -> TronStationResult<AccountResources> {
        self.account_resources(&self.resource_address).await
    }
}

/// Amounts must be finite and strictly positive.
pub(crate) fn validate_positive(name: &str, value: f64) -> TronStationResult<f64> {
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(TronStationError::InvalidArgument(format!(
            "{} must be greater than zero, got {}",
            name, value
        )))
    }
}

/// Divides by [`SUN_PER_TRX`]. Applied to the input of the frozen energy and bandwidth estimates.
pub(crate) fn sun_to_trx(amount: f64) -> f64 { amount / SUN_PER_TRX }

/// Network weights are divisors, a zero weight makes the estimate meaningless.
pub(crate) fn positive_weight(name: &str, weight: i64) -> TronStationResult<f64> {
    if weight > 0 {
        Ok(weight as f64)
    } else {
        Err(TronStationError::UpstreamDataError(format!(
            "'{}' must be positive, got {}",
            name, weight
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::for_tests::{TestChainClient, MAINNET_RESOURCE_ADDRESS_HEX};

    #[test]
    fn test_new_station_canonicalizes_resource_address() {
        let station = TronStation::new(TestChainClient::default(), TronStationConf::new(Network::Mainnet)).unwrap();
        assert_eq!(station.resource_address, MAINNET_RESOURCE_ADDRESS_HEX);
        assert!(station.is_main());
    }

    #[test]
    fn test_new_station_rejects_invalid_resource_address() {
        let conf = TronStationConf {
            network: Network::Nile,
            resource_address: Some("not an address".to_string()),
        };
        let err = TronStation::new(TestChainClient::default(), conf).err().unwrap();
        assert!(matches!(err, TronStationError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_positive() {
        assert_eq!(validate_positive("Amount", 1.5).unwrap(), 1.5);
        for bad in [0., -1., f64::NAN, f64::INFINITY] {
            assert!(matches!(
                validate_positive("Amount", bad),
                Err(TronStationError::InvalidArgument(_))
            ));
        }
    }
}

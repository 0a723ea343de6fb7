use crate::errors::{TronStationError, TronStationResult};
use serde_json::Value as Json;

/// Fallback when `getTotalEnergyLimit` is not reported by the node.
pub const DEFAULT_TOTAL_ENERGY_LIMIT: i64 = 50_000_000_000;

const MAINNET_RESOURCE_ADDRESS: &str = "4142232FF1BDDD5F01C948C9A661E43308648CFEB2";
const SHASTA_RESOURCE_ADDRESS: &str = "41928C9AF0651632157EF27A2CF17CA72C575A4D21";

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Shasta,
    Nile,
}

impl Network {
    /// Only the primary network has a fixed set of 27 block producers.
    pub fn is_main(&self) -> bool { matches!(self, Network::Mainnet) }

    /// Account whose resource query is used to read network-wide totals.
    pub fn default_resource_address(&self) -> Option<&'static str> {
        match self {
            Network::Mainnet => Some(MAINNET_RESOURCE_ADDRESS),
            Network::Shasta => Some(SHASTA_RESOURCE_ADDRESS),
            Network::Nile => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TronStationConf {
    pub network: Network,
    /// Overrides [`Network::default_resource_address`].
    #[serde(default)]
    pub resource_address: Option<String>,
}

impl TronStationConf {
    pub fn new(network: Network) -> Self {
        TronStationConf {
            network,
            resource_address: None,
        }
    }

    pub fn from_json(conf: &Json) -> TronStationResult<Self> {
        serde_json::from_value(conf.clone()).map_err(|e| TronStationError::InvalidConfig(e.to_string()))
    }

    pub fn resource_address(&self) -> TronStationResult<String> {
        self.resource_address
            .clone()
            .or_else(|| self.network.default_resource_address().map(String::from))
            .ok_or_else(|| {
                TronStationError::InvalidConfig(format!(
                    "'resource_address' must be set for the {:?} network",
                    self.network
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conf_from_json() {
        let conf = TronStationConf::from_json(&json!({"network": "mainnet"})).unwrap();
        assert!(conf.network.is_main());
        assert_eq!(conf.resource_address().unwrap(), MAINNET_RESOURCE_ADDRESS);

        let conf = TronStationConf::from_json(&json!({
            "network": "shasta",
            "resource_address": "TNPeeaaFB7K9cmo4uQpcU32zGK8G1NYqeL"
        }))
        .unwrap();
        assert!(!conf.network.is_main());
        assert_eq!(conf.resource_address().unwrap(), "TNPeeaaFB7K9cmo4uQpcU32zGK8G1NYqeL");
    }

    #[test]
    fn test_nile_requires_resource_address() {
        let conf = TronStationConf::new(Network::Nile);
        assert!(matches!(conf.resource_address(), Err(TronStationError::InvalidConfig(_))));
    }

    #[test]
    fn test_conf_unknown_network() {
        let err = TronStationConf::from_json(&json!({"network": "ropsten"})).unwrap_err();
        assert!(matches!(err, TronStationError::InvalidConfig(_)));
    }
}

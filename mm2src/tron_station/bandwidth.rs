use crate::chain_client::TronChainClient;
use crate::errors::TronStationResult;
use crate::{positive_weight, sun_to_trx, validate_positive, TronStation};

pub const TOTAL_NET_LIMIT: &str = "TotalNetLimit";
pub const TOTAL_NET_WEIGHT: &str = "TotalNetWeight";
pub const FREE_NET_LIMIT: &str = "freeNetLimit";
pub const FREE_NET_USED: &str = "freeNetUsed";
pub const NET_LIMIT: &str = "NetLimit";
pub const NET_USED: &str = "NetUsed";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrozenBandwidth {
    pub bp: f64,
}

/// Bandwidth points of an account. Field names follow the wallet API (`bp` = bandwidth points).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AccountBandwidth {
    pub balance: i64,
    pub freebp: i64,
    #[serde(rename = "freebpUsed")]
    pub freebp_used: i64,
    pub accountbp: i64,
    #[serde(rename = "accountbpUsed")]
    pub accountbp_used: i64,
    /// May go negative if the node reports more usage than limit.
    pub totalbp: i64,
}

impl<C: TronChainClient> TronStation<C> {
    pub async fn calculate_frozen_bandwidth(&self, amount: f64) -> TronStationResult<FrozenBandwidth> {
        let amount = validate_positive("Amount", sun_to_trx(amount))?;

        let resources = self.network_resources().await?;
        let total_net_limit = resources.get_or_zero(TOTAL_NET_LIMIT) as f64;
        let total_net_weight = positive_weight(TOTAL_NET_WEIGHT, resources.get_or_zero(TOTAL_NET_WEIGHT))?;

        Ok(FrozenBandwidth {
            bp: amount * total_net_limit / total_net_weight,
        })
    }

    pub async fn get_account_bandwidth(&self, address: &str) -> TronStationResult<AccountBandwidth> {
        self.validate_address(address)?;

        let account = self.client().get_account(address).await?;
        let resources = self.account_resources(address).await?;

        let freebp = resources.get_or_zero(FREE_NET_LIMIT);
        let freebp_used = resources.get_or_zero(FREE_NET_USED);
        let accountbp = resources.get_or_zero(NET_LIMIT);
        let accountbp_used = resources.get_or_zero(NET_USED);

        Ok(AccountBandwidth {
            balance: account.balance_or_zero(),
            freebp,
            freebp_used,
            accountbp,
            accountbp_used,
            totalbp: freebp + accountbp - freebp_used - accountbp_used,
        })
    }
}

use crate::chain_client::{ChainParameters, TronChainClient};
use crate::conf::DEFAULT_TOTAL_ENERGY_LIMIT;
use crate::errors::{TronStationError, TronStationResult};
use crate::{positive_weight, sun_to_trx, validate_positive, TronStation};

pub const TOTAL_ENERGY_LIMIT_PARAM: &str = "getTotalEnergyLimit";
pub const ENERGY_FEE_PARAM: &str = "getEnergyFee";
pub const TOTAL_ENERGY_WEIGHT: &str = "TotalEnergyWeight";
pub const ENERGY_LIMIT: &str = "EnergyLimit";
pub const ENERGY_USED: &str = "EnergyUsed";

/// Upper bound of a transaction fee limit, in sun.
pub const MAX_FEE_LIMIT: f64 = 1_000_000_000.;

/// Breakdown of [`TronStation::calculate_max_energy_limit`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxEnergyLimit {
    pub account_energy: i64,
    pub account_energy_used: i64,
    pub account_trx_energy: f64,
    pub account_total_energy: f64,
    pub fee_limit: f64,
    /// `None` when the network reports no `TotalEnergyWeight`.
    pub fee_limit_energy: Option<f64>,
    pub max_energy_limit: f64,
    pub balance: i64,
    pub energy_fee: i64,
    pub total_energy_limit: i64,
    pub total_energy_weight: i64,
    /// Energy per sun of fee limit, `None` when the network reports no `TotalEnergyWeight`.
    pub ratio: Option<f64>,
}

fn total_energy_limit(params: &ChainParameters) -> i64 {
    params.get_or(TOTAL_ENERGY_LIMIT_PARAM, DEFAULT_TOTAL_ENERGY_LIMIT)
}

/// The energy fee is a divisor everywhere it is used, so it must be present and positive.
fn energy_fee(params: &ChainParameters) -> TronStationResult<i64> {
    match params.get(ENERGY_FEE_PARAM) {
        Some(fee) if fee > 0 => Ok(fee),
        Some(fee) => Err(TronStationError::ConfigurationError(format!(
            "'{}' must be positive, got {}",
            ENERGY_FEE_PARAM, fee
        ))),
        None => Err(TronStationError::ConfigurationError(format!(
            "'{}' chain parameter is not set",
            ENERGY_FEE_PARAM
        ))),
    }
}

impl<C: TronChainClient> TronStation<C> {
    /// Energy obtained by freezing `amount`.
    /// The amount is divided by [`crate::SUN_PER_TRX`] first, unlike [`TronStation::calculate_burn_energy`].
    pub async fn calculate_frozen_energy(&self, amount: f64) -> TronStationResult<f64> {
        let amount = validate_positive("Amount", sun_to_trx(amount))?;

        let resources = self.network_resources().await?;
        let total_energy_weight = positive_weight(TOTAL_ENERGY_WEIGHT, resources.get_or_zero(TOTAL_ENERGY_WEIGHT))?;
        let params = self.client().get_chain_parameters().await?;
        let total_energy_limit = total_energy_limit(&params) as f64;

        Ok(amount * total_energy_limit / total_energy_weight)
    }

    /// Energy that burning `amount` sun pays for.
    pub async fn calculate_burn_energy(&self, amount: f64) -> TronStationResult<f64> {
        let amount = validate_positive("Amount", amount)?;

        let params = self.client().get_chain_parameters().await?;
        let energy_fee = energy_fee(&params)?;

        Ok(amount / energy_fee as f64)
    }

    /// Maximum energy a transaction from `address` can consume with `fee_limit` sun.
    ///
    /// The account can spend its staked energy plus whatever its balance buys at the current energy
    /// fee. When the staked energy alone exceeds what the fee limit converts to, the fee limit caps it.
    pub async fn calculate_max_energy_limit(&self, address: &str, fee_limit: f64) -> TronStationResult<MaxEnergyLimit> {
        self.validate_address(address)?;
        let fee_limit = validate_positive("Fee limit", fee_limit)?;
        if fee_limit > MAX_FEE_LIMIT {
            return Err(TronStationError::InvalidArgument(format!(
                "Fee limit has a max limit of {} sun, got {}",
                MAX_FEE_LIMIT, fee_limit
            )));
        }

        let account = self.client().get_account(address).await?;
        let balance = account.balance_or_zero();

        let params = self.client().get_chain_parameters().await?;
        let total_energy_limit = total_energy_limit(&params);
        let energy_fee = energy_fee(&params)?;

        let resources = self.account_resources(address).await?;
        let energy_limit = resources.get_or_zero(ENERGY_LIMIT);
        let energy_used = resources.get_or_zero(ENERGY_USED);
        let total_energy_weight = resources.get_or_zero(TOTAL_ENERGY_WEIGHT);

        let account_trx_energy = balance as f64 / energy_fee as f64;
        let account_total_energy = energy_limit as f64 + account_trx_energy - energy_used as f64;

        // Without a weight the fee limit converts to unbounded energy and never caps.
        let ratio = (total_energy_weight > 0).then(|| total_energy_limit as f64 / total_energy_weight as f64);
        let fee_limit_energy = ratio.map(|ratio| fee_limit * ratio);

        let max_energy_limit = match fee_limit_energy {
            Some(fee_limit_energy) if energy_limit as f64 > fee_limit_energy => {
                account_total_energy.min(fee_limit_energy)
            },
            _ => account_total_energy,
        };

        Ok(MaxEnergyLimit {
            account_energy: energy_limit,
            account_energy_used: energy_used,
            account_trx_energy,
            account_total_energy,
            fee_limit,
            fee_limit_energy,
            max_energy_limit,
            balance,
            energy_fee,
            total_energy_limit,
            total_energy_weight,
            ratio,
        })
    }
}

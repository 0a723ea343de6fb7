//! JSON entry point for callers that hold untyped input, e.g. an RPC layer.
//!
//! ```json
//! {"method": "calculate_max_energy_limit", "params": {"address": "T...", "fee_limit": 100000000}}
//! ```
//! Numeric params may be given as JSON numbers or numeric strings.

use crate::chain_client::TronChainClient;
use crate::errors::{TronStationError, TronStationResult};
use crate::TronStation;
use serde::Serialize;
use serde_json::Value as Json;

#[derive(Debug, Deserialize)]
struct TronStationRpcRequest {
    method: String,
    #[serde(default)]
    params: Json,
}

fn missing_param(name: &str) -> TronStationError { TronStationError::InvalidArgument(format!("Missing '{}'", name)) }

fn number_param(params: &Json, name: &str) -> TronStationResult<f64> {
    match params.get(name) {
        None | Some(Json::Null) => Err(missing_param(name)),
        Some(Json::Number(number)) => number
            .as_f64()
            .ok_or_else(|| TronStationError::InvalidArgument(format!("'{}' is not representable: {}", name, number))),
        Some(Json::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| TronStationError::InvalidArgument(format!("'{}' is not numeric: {}", name, s))),
        Some(other) => Err(TronStationError::InvalidArgument(format!(
            "'{}' is not numeric: {}",
            name, other
        ))),
    }
}

fn str_param<'a>(params: &'a Json, name: &str) -> TronStationResult<&'a str> {
    match params.get(name) {
        None | Some(Json::Null) => Err(missing_param(name)),
        Some(value) => value
            .as_str()
            .ok_or_else(|| TronStationError::InvalidArgument(format!("'{}' must be a string", name))),
    }
}

fn to_json<T: Serialize>(result: T) -> TronStationResult<Json> { Ok(serde_json::to_value(result)?) }

pub async fn dispatch_tron_station_rpc<C: TronChainClient>(
    station: &TronStation<C>,
    request: Json,
) -> TronStationResult<Json> {
    let TronStationRpcRequest { method, params } = serde_json::from_value(request)?;
    debug!("tron_station rpc '{}' with {}", method, params);

    match method.as_str() {
        "calculate_frozen_energy" => to_json(station.calculate_frozen_energy(number_param(&params, "amount")?).await?),
        "calculate_burn_energy" => to_json(station.calculate_burn_energy(number_param(&params, "amount")?).await?),
        "calculate_max_energy_limit" => {
            let address = str_param(&params, "address")?;
            let fee_limit = number_param(&params, "fee_limit")?;
            to_json(station.calculate_max_energy_limit(address, fee_limit).await?)
        },
        "calculate_frozen_bandwidth" => {
            to_json(station.calculate_frozen_bandwidth(number_param(&params, "amount")?).await?)
        },
        "get_account_bandwidth" => to_json(station.get_account_bandwidth(str_param(&params, "address")?).await?),
        "get_sr_vote_reward_list" => to_json(station.get_sr_vote_reward_list().await?),
        "calculate_sr_reward" => {
            let votes = number_param(&params, "votes")?;
            let sr_address = str_param(&params, "sr_address")?;
            to_json(station.calculate_sr_reward(votes, sr_address).await?)
        },
        _ => Err(TronStationError::InvalidArgument(format!("Unknown method '{}'", method))),
    }
}

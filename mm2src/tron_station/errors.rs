use crate::chain_client::ChainClientError;
use derive_more::Display;
use http::StatusCode;

pub type TronStationResult<T> = Result<T, TronStationError>;

#[derive(Clone, Debug, Display, PartialEq, Serialize)]
#[serde(tag = "error_type", content = "error_data")]
pub enum TronStationError {
    #[display(fmt = "Invalid argument: {}", _0)]
    InvalidArgument(String),
    #[display(fmt = "Chain configuration error: {}", _0)]
    ConfigurationError(String),
    #[display(fmt = "Unusable data from chain client: {}", _0)]
    UpstreamDataError(String),
    #[display(fmt = "Chain client error: {}", _0)]
    ChainClient(ChainClientError),
    #[display(fmt = "Invalid station config: {}", _0)]
    InvalidConfig(String),
}

impl std::error::Error for TronStationError {}

impl From<ChainClientError> for TronStationError {
    fn from(e: ChainClientError) -> Self { TronStationError::ChainClient(e) }
}

impl From<serde_json::Error> for TronStationError {
    fn from(e: serde_json::Error) -> Self { TronStationError::InvalidArgument(e.to_string()) }
}

impl TronStationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TronStationError::InvalidArgument(_) | TronStationError::InvalidConfig(_) => StatusCode::BAD_REQUEST,
            TronStationError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TronStationError::UpstreamDataError(_) | TronStationError::ChainClient(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = TronStationError::ConfigurationError("getEnergyFee is not set".to_string());
        let actual = serde_json::to_value(&err).unwrap();
        let expected = json!({
            "error_type": "ConfigurationError",
            "error_data": "getEnergyFee is not set",
        });
        assert_eq!(actual, expected);
        assert_eq!(err.to_string(), "Chain configuration error: getEnergyFee is not set");
    }

    #[test]
    fn test_chain_client_error_status() {
        let err: TronStationError = ChainClientError::Transport("connection refused".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            TronStationError::InvalidArgument("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}

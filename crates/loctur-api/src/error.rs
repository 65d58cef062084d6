//! Resource API error types

use loctur_gateway::GatewayError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Coordinates out of range: {latitude}, {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Metrics range must be at least one day")]
    InvalidRange,

    #[error("Bulk delete needs a positive file count")]
    InvalidCount,
}

impl ApiError {
    /// Whether the server rejected the session (401/403)
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Gateway(e) if e.is_auth_failure())
    }
}

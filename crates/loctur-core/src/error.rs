//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Request error: {0}")]
    Gateway(#[from] loctur_gateway::GatewayError),

    #[error("API error: {0}")]
    Api(#[from] loctur_api::ApiError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] loctur_navigation::NavigationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not signed in")]
    NotAuthenticated,
}

impl CoreError {
    /// Whether the server rejected the session (401/403)
    pub fn is_auth_failure(&self) -> bool {
        match self {
            CoreError::Gateway(e) => e.is_auth_failure(),
            CoreError::Api(e) => e.is_auth_failure(),
            CoreError::NotAuthenticated => true,
            _ => false,
        }
    }
}

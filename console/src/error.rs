//! Console error types

use loctur_core::{ApiError, CoreError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not signed in; pass --username and --password or set LOCTUR_USERNAME and LOCTUR_PASSWORD")]
    MissingCredentials,
}

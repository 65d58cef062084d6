//! LocTur Core
//!
//! Wires the request gateway, session store, navigator and resource API
//! into one [`Console`] handle.

mod config;
mod console;
mod credentials;
mod error;

pub use config::{Config, DEFAULT_SERVER_URL, SERVER_URL_ENV};
pub use console::Console;
pub use credentials::Credentials;
pub use error::CoreError;

// Re-export core components
pub use loctur_api::{Api, ApiError, Coordinates, PhotoUpload, DEFAULT_RANGE_DAYS};
pub use loctur_gateway::{Gateway, GatewayError, Transport, TransportOptions};
pub use loctur_navigation::{Location, NavigationError, Navigator, Visit};
pub use loctur_session::{AuthPhase, Session, SessionStore, User};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

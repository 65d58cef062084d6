//! Application state management
use loctur_core::{AuthPhase, Config, Console, Credentials, Result};

use crate::error::CliError;

/// Console plus the credentials to sign in with when the session is missing
pub struct AppState {
    console: Console,
    credentials: Option<Credentials>,
}

impl AppState {
    pub fn new(config: Config, credentials: Option<Credentials>) -> Result<Self> {
        Ok(Self {
            console: Console::new(config)?,
            credentials,
        })
    }

    #[cfg(test)]
    pub fn with_console(console: Console, credentials: Option<Credentials>) -> Self {
        Self {
            console,
            credentials,
        }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub async fn initialize(&self) -> AuthPhase {
        self.console.boot().await
    }

    /// Sign in with the configured credentials unless already signed in
    pub async fn ensure_signed_in(&self) -> std::result::Result<(), CliError> {
        if self.console.session().is_authenticated() {
            return Ok(());
        }

        let credentials = self
            .credentials
            .as_ref()
            .ok_or(CliError::MissingCredentials)?;
        self.console.sign_in(credentials).await?;
        Ok(())
    }
}

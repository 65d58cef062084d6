//! Sign-in credentials

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::Result;

/// Sign-in form input
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are required; checked before anything is sent
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(CoreError::Validation("Please input your username!".into()));
        }
        if self.password.is_empty() {
            return Err(CoreError::Validation("Please input your password!".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

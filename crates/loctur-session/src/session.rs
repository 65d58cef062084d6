//! Session data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::phase::AuthPhase;
use crate::user::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub is_authenticated: bool,
    /// True until the initial probe settles, never again afterwards
    pub is_loading: bool,
    /// Only ever set while authenticated
    pub user: Option<User>,
    /// When the session last became authenticated
    pub authenticated_at: Option<DateTime<Utc>>,
}

impl Session {
    /// State at process start
    pub fn booting() -> Self {
        Self {
            is_authenticated: false,
            is_loading: true,
            user: None,
            authenticated_at: None,
        }
    }

    /// Loading wins: the console shows nothing but a spinner until the
    /// initial probe settles, whatever happens meanwhile.
    pub fn phase(&self) -> AuthPhase {
        if self.is_loading {
            AuthPhase::Booting
        } else if self.is_authenticated {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Unauthenticated
        }
    }

    /// Mark authenticated. A `None` user keeps whatever record is present.
    pub(crate) fn authenticate(&mut self, user: Option<User>) {
        if !self.is_authenticated {
            self.authenticated_at = Some(Utc::now());
        }
        self.is_authenticated = true;
        if let Some(user) = user {
            self.user = Some(user);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.is_authenticated = false;
        self.user = None;
        self.authenticated_at = None;
    }

    /// `user` is present only when authenticated
    pub fn is_consistent(&self) -> bool {
        self.user.is_none() || self.is_authenticated
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::booting()
    }
}

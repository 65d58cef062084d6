//! Session State Machine
//!
//! ```text
//! Booting
//!   ↓ probe succeeds / probe fails
//! Authenticated ⇄ Unauthenticated
//!   login() / logout(), invalidation
//! ```
//!
//! `Booting` is only ever the starting phase.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthPhase {
    /// Initial probe still in flight
    Booting,
    Authenticated,
    Unauthenticated,
}

impl AuthPhase {
    /// Check if transition to another phase is valid
    pub fn can_transition_to(&self, target: AuthPhase) -> bool {
        match (self, target) {
            // Same phase is always valid (no-op)
            (a, b) if *a == b => true,
            // Nothing returns to Booting
            (_, AuthPhase::Booting) => false,
            // Booting settles either way, loaded phases cycle freely
            _ => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthPhase::Booting => "booting",
            AuthPhase::Authenticated => "authenticated",
            AuthPhase::Unauthenticated => "unauthenticated",
        }
    }
}

impl std::fmt::Display for AuthPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

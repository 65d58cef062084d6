//! LocTur Session Store
//!
//! Process-wide answer to "is someone signed in, and who":
//! - Created once at startup in the `Booting` phase
//! - `initialize()` probes `auth/user/` and settles the first answer
//! - `login()`/`logout()` move between the two loaded phases
//! - A 401/403 seen by the gateway downgrades the session without a round trip
//!
//! Failures never escape the store. Anything that goes wrong while probing
//! just means "not signed in".

pub mod endpoints;
mod phase;
mod session;
mod store;
mod user;

pub use phase::AuthPhase;
pub use session::Session;
pub use store::SessionStore;
pub use user::User;

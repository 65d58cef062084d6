//! LocTur Navigation
//!
//! The console's routes and where the user currently is:
//! - `/login` is the login surface, the only route reachable signed out
//! - `/` resolves to the dashboard
//! - Every navigation hands out a [`Visit`]; a view checks
//!   [`Visit::is_current`] before acting on a late response

mod error;
mod location;
mod navigator;

pub use error::NavigationError;
pub use location::Location;
pub use navigator::{Navigator, Visit};

pub type Result<T> = std::result::Result<T, NavigationError>;

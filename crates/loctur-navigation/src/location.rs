//! Console routes

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::NavigationError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "route", content = "id", rename_all = "snake_case")]
pub enum Location {
    /// Sign-in form
    Login,
    #[default]
    Dashboard,
    Trips,
    TripDetail(Uuid),
    Places,
    Travelers,
    Expenses,
    Settings,
}

impl Location {
    /// Resolve a path or absolute URL to a route.
    ///
    /// Query strings and fragments are ignored, trailing slashes are optional.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let path = match Url::parse(input) {
            Ok(url) => url.path().to_string(),
            Err(_) => input
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_string(),
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["dashboard"] => Ok(Location::Dashboard),
            ["login"] => Ok(Location::Login),
            ["trips"] => Ok(Location::Trips),
            ["trips", id] => Uuid::parse_str(id)
                .map(Location::TripDetail)
                .map_err(|_| NavigationError::InvalidTripId(id.to_string())),
            ["places"] => Ok(Location::Places),
            ["travelers"] => Ok(Location::Travelers),
            ["expenses"] => Ok(Location::Expenses),
            ["settings"] => Ok(Location::Settings),
            _ => Err(NavigationError::UnknownRoute(input.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Location::Login => "/login".to_string(),
            Location::Dashboard => "/dashboard".to_string(),
            Location::Trips => "/trips".to_string(),
            Location::TripDetail(id) => format!("/trips/{id}"),
            Location::Places => "/places".to_string(),
            Location::Travelers => "/travelers".to_string(),
            Location::Expenses => "/expenses".to_string(),
            Location::Settings => "/settings".to_string(),
        }
    }

    pub fn is_login_surface(&self) -> bool {
        matches!(self, Location::Login)
    }

    pub fn requires_auth(&self) -> bool {
        !self.is_login_surface()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl std::str::FromStr for Location {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self> {
        Location::parse(s)
    }
}

//! LocTur Resource API
//!
//! Thin calls over the [`Gateway`], one group per backend resource. Bodies
//! and answers are opaque JSON; the gateway takes care of cookies, CSRF
//! and session invalidation.

mod error;
mod expenses;
mod files;
mod metrics;
mod places;
mod settings;
mod travelers;
mod trips;

pub use error::ApiError;
pub use expenses::Expenses;
pub use files::Files;
pub use metrics::{Metrics, DEFAULT_RANGE_DAYS};
pub use places::{Coordinates, PhotoUpload, Places};
pub use settings::Settings;
pub use travelers::{Travelers, UserTrips};
pub use trips::Trips;

use loctur_gateway::Gateway;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct Api {
    gateway: Gateway,
}

impl Api {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn trips(&self) -> Trips<'_> {
        Trips::new(&self.gateway)
    }

    pub fn places(&self) -> Places<'_> {
        Places::new(&self.gateway)
    }

    pub fn travelers(&self) -> Travelers<'_> {
        Travelers::new(&self.gateway)
    }

    pub fn user_trips(&self) -> UserTrips<'_> {
        UserTrips::new(&self.gateway)
    }

    pub fn expenses(&self) -> Expenses<'_> {
        Expenses::new(&self.gateway)
    }

    pub fn files(&self) -> Files<'_> {
        Files::new(&self.gateway)
    }

    pub fn metrics(&self) -> Metrics<'_> {
        Metrics::new(&self.gateway)
    }

    pub fn settings(&self) -> Settings<'_> {
        Settings::new(&self.gateway)
    }
}

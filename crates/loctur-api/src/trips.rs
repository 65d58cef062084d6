//! Trips: `trips/`, `trips/{id}/` and the per-trip actions

use loctur_gateway::{Body, Gateway, Method};
use serde_json::Value;
use uuid::Uuid;

use crate::Result;

pub struct Trips<'a> {
    gateway: &'a Gateway,
}

impl<'a> Trips<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// List trips, `query` holds the listing filters
    pub async fn list(&self, query: &[(&str, &str)]) -> Result<Value> {
        Ok(self.gateway.value(Method::GET, "trips/", query, Body::Empty).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Value> {
        Ok(self
            .gateway
            .value(Method::GET, &format!("trips/{id}/"), &[], Body::Empty)
            .await?)
    }

    pub async fn create(&self, trip: Value) -> Result<Value> {
        Ok(self
            .gateway
            .value(Method::POST, "trips/", &[], Body::Json(trip))
            .await?)
    }

    /// Partial update
    pub async fn update(&self, id: Uuid, changes: Value) -> Result<Value> {
        Ok(self
            .gateway
            .value(Method::PATCH, &format!("trips/{id}/"), &[], Body::Json(changes))
            .await?)
    }

    pub async fn participants(&self, id: Uuid) -> Result<Value> {
        Ok(self
            .gateway
            .value(Method::GET, &format!("trips/{id}/participants/"), &[], Body::Empty)
            .await?)
    }

    /// Flip the trip's announcement flag, answers the updated trip
    pub async fn toggle_announcement(&self, id: Uuid) -> Result<Value> {
        tracing::info!(trip = %id, "Toggling trip announcement");
        Ok(self
            .gateway
            .value(
                Method::POST,
                &format!("trips/{id}/toggle-announcement/"),
                &[],
                Body::Empty,
            )
            .await?)
    }
}

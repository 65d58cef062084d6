//! Travelers and their trip memberships (`user-trips/`)

use loctur_gateway::{Body, Gateway, Method};
use serde_json::Value;
use uuid::Uuid;

use crate::Result;

pub struct Travelers<'a> {
    gateway: &'a Gateway,
}

impl<'a> Travelers<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, query: &[(&str, &str)]) -> Result<Value> {
        Ok(self.gateway.value(Method::GET, "travelers/", query, Body::Empty).await?)
    }

    pub async fn update(&self, id: Uuid, changes: Value) -> Result<Value> {
        Ok(self
            .gateway
            .value(Method::PATCH, &format!("travelers/{id}/"), &[], Body::Json(changes))
            .await?)
    }
}

pub struct UserTrips<'a> {
    gateway: &'a Gateway,
}

impl<'a> UserTrips<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, query: &[(&str, &str)]) -> Result<Value> {
        Ok(self.gateway.value(Method::GET, "user-trips/", query, Body::Empty).await?)
    }

    /// Change a membership, e.g. its payment status
    pub async fn update(&self, id: Uuid, changes: Value) -> Result<Value> {
        Ok(self
            .gateway
            .value(Method::PATCH, &format!("user-trips/{id}/"), &[], Body::Json(changes))
            .await?)
    }
}

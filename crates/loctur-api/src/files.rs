//! Uploaded file housekeeping

use loctur_gateway::{Body, Gateway, Method};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::Result;

pub struct Files<'a> {
    gateway: &'a Gateway,
}

impl<'a> Files<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Storage totals across all trips
    pub async fn stats(&self) -> Result<Value> {
        Ok(self.gateway.value(Method::GET, "files/stats/", &[], Body::Empty).await?)
    }

    /// Delete the `count` oldest files
    pub async fn bulk_delete(&self, count: u32) -> Result<Value> {
        if count == 0 {
            return Err(ApiError::InvalidCount);
        }

        tracing::info!(count, "Bulk deleting files");
        Ok(self
            .gateway
            .value(
                Method::POST,
                "files/bulk-delete/",
                &[],
                Body::Json(json!({ "count": count })),
            )
            .await?)
    }

    pub async fn trip_stats(&self, trip: Uuid) -> Result<Value> {
        Ok(self
            .gateway
            .value(Method::GET, &format!("trips/{trip}/files/stats/"), &[], Body::Empty)
            .await?)
    }

    /// Delete every file attached to a trip
    pub async fn delete_trip_files(&self, trip: Uuid) -> Result<Value> {
        tracing::info!(trip = %trip, "Deleting trip files");
        Ok(self
            .gateway
            .value(Method::POST, &format!("trips/{trip}/files/delete/"), &[], Body::Empty)
            .await?)
    }
}

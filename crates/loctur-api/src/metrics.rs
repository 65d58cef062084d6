//! Dashboard metrics

use loctur_gateway::{Body, Gateway, Method};
use serde_json::Value;

use crate::error::ApiError;
use crate::Result;

/// Window used by the dashboard unless told otherwise
pub const DEFAULT_RANGE_DAYS: u32 = 30;

pub struct Metrics<'a> {
    gateway: &'a Gateway,
}

impl<'a> Metrics<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Overview over the last `range_days` days, sent as `range=<n>d`
    pub async fn overview(&self, range_days: u32) -> Result<Value> {
        if range_days == 0 {
            return Err(ApiError::InvalidRange);
        }

        let range = format!("{range_days}d");
        Ok(self
            .gateway
            .value(Method::GET, "metrics/overview/", &[("range", range.as_str())], Body::Empty)
            .await?)
    }
}

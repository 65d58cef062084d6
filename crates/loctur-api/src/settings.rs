//! Site settings. A fresh backend has none until they are created.

use loctur_gateway::{Body, Gateway, Method};
use serde_json::Value;

use crate::Result;

pub struct Settings<'a> {
    gateway: &'a Gateway,
}

impl<'a> Settings<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn get(&self) -> Result<Value> {
        Ok(self.gateway.value(Method::GET, "settings/", &[], Body::Empty).await?)
    }

    /// Replace the current settings
    pub async fn update(&self, settings: Value) -> Result<Value> {
        Ok(self
            .gateway
            .value(Method::PUT, "settings/update/", &[], Body::Json(settings))
            .await?)
    }

    pub async fn create(&self, settings: Value) -> Result<Value> {
        Ok(self
            .gateway
            .value(Method::POST, "settings/", &[], Body::Json(settings))
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::api;
    use loctur_gateway::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_update_uses_put() {
        let (api, transport) = api();
        transport.respond_json(Method::PUT, "/api/settings/update/", 200, json!({"currency": "RUB"}));

        let settings = api.settings().update(json!({"currency": "RUB"})).await.unwrap();

        assert_eq!(settings["currency"], "RUB");
        assert_eq!(transport.requests_to("/api/settings/update/")[0].method, Method::PUT);
    }
}

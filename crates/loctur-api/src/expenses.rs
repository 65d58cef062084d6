//! Trip expenses

use loctur_gateway::{Body, Gateway, Method};
use serde_json::Value;

use crate::Result;

pub struct Expenses<'a> {
    gateway: &'a Gateway,
}

impl<'a> Expenses<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, query: &[(&str, &str)]) -> Result<Value> {
        Ok(self.gateway.value(Method::GET, "expenses/", query, Body::Empty).await?)
    }

    pub async fn create(&self, expense: Value) -> Result<Value> {
        Ok(self
            .gateway
            .value(Method::POST, "expenses/", &[], Body::Json(expense))
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::api;
    use loctur_gateway::{Body, Method};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_expense() {
        let (api, transport) = api();
        transport.respond_json(Method::POST, "/api/expenses/", 201, json!({"amount": "1500.00"}));

        let expense = api
            .expenses()
            .create(json!({"title": "Bus", "amount": "1500.00"}))
            .await
            .unwrap();

        assert_eq!(expense["amount"], "1500.00");
        let sent = transport.requests_to("/api/expenses/");
        assert!(matches!(&sent[0].body, Body::Json(v) if v["title"] == "Bus"));
    }
}

//! Transport seam
//!
//! [`HttpTransport`] is the production implementation on top of `reqwest`.
//! Tests swap in [`ScriptedTransport`](crate::testing::ScriptedTransport).

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::multipart::{Form, Part};
use std::sync::Arc;
use std::time::Duration;

use crate::error::GatewayError;
use crate::request::{ApiRequest, ApiResponse, Body, FormPart, FormValue};
use crate::Result;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one HTTP exchange. Non-2xx answers are returned as responses,
    /// only failures to get an answer are errors.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("loctur-admin/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client that stores and replays cookies through `jar`
    pub fn new(jar: Arc<Jar>, options: &TransportOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_provider(jar)
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()
            .map_err(GatewayError::from_reqwest)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        let builder = match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        let response = builder.send().await.map_err(GatewayError::from_reqwest)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(GatewayError::from_reqwest)?
            .to_vec();

        Ok(ApiResponse::new(status, body))
    }
}

fn build_form(parts: Vec<FormPart>) -> Result<Form> {
    let mut form = Form::new();

    for part in parts {
        form = match part.value {
            FormValue::Text(value) => form.text(part.name, value),
            FormValue::File {
                file_name,
                mime_type,
                bytes,
            } => {
                let mut file = Part::bytes(bytes).file_name(file_name);
                if let Some(mime) = mime_type {
                    file = file.mime_str(&mime).map_err(GatewayError::from_reqwest)?;
                }
                form.part(part.name, file)
            }
        };
    }

    Ok(form)
}

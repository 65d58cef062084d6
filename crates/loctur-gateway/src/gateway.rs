//! The request gateway

use parking_lot::RwLock;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

use crate::csrf::{token_from_cookie_header, CSRF_COOKIE, CSRF_HEADER};
use crate::error::{is_auth_failure, GatewayError};
use crate::request::{ApiRequest, ApiResponse, Body};
use crate::signal::AuthSignal;
use crate::transport::{HttpTransport, Transport, TransportOptions};
use crate::Result;

/// Every endpoint lives under `<server>/api/`
pub const API_PREFIX: &str = "api/";

/// Answers whether the console is currently showing the login surface.
///
/// Authorization failures seen there are expected and must not broadcast.
pub trait LocationProbe: Send + Sync {
    fn on_login_surface(&self) -> bool;
}

impl<F> LocationProbe for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn on_login_surface(&self) -> bool {
        self()
    }
}

struct Inner {
    base: Url,
    jar: Arc<Jar>,
    transport: Arc<dyn Transport>,
    signal: AuthSignal,
    location: RwLock<Option<Arc<dyn LocationProbe>>>,
}

#[derive(Clone)]
pub struct Gateway {
    inner: Arc<Inner>,
}

impl Gateway {
    /// Gateway over a real HTTP client with its own cookie jar
    pub fn new(server_url: &str, options: &TransportOptions) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let transport = HttpTransport::new(Arc::clone(&jar), options)?;
        Self::with_transport(server_url, jar, Arc::new(transport))
    }

    /// Gateway over any transport. `jar` is where CSRF tokens are read from.
    pub fn with_transport(
        server_url: &str,
        jar: Arc<Jar>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let base = api_base(server_url)?;

        tracing::debug!(base = %base, "Created request gateway");

        Ok(Self {
            inner: Arc::new(Inner {
                base,
                jar,
                transport,
                signal: AuthSignal::new(),
                location: RwLock::new(None),
            }),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }

    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.inner.jar
    }

    /// The invalidation broadcast this gateway emits into
    pub fn signal(&self) -> &AuthSignal {
        &self.inner.signal
    }

    pub fn set_location_probe<P>(&self, probe: P)
    where
        P: LocationProbe + 'static,
    {
        *self.inner.location.write() = Some(Arc::new(probe));
    }

    /// Resolve an endpoint path (`auth/user/` or `/auth/user/`) under the API base
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.inner.base.join(path.trim_start_matches('/'))?)
    }

    /// Current CSRF token as the server would see it for `url`
    pub fn csrf_token(&self, url: &Url) -> Option<String> {
        let cookies = self.inner.jar.cookies(url)?;
        token_from_cookie_header(cookies.to_str().ok()?, CSRF_COOKIE)
    }

    /// Send one request.
    ///
    /// Non-2xx answers come back as [`GatewayError::Status`]. A 401/403 also
    /// emits the invalidation broadcast first, unless on the login surface.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Body,
    ) -> Result<ApiResponse> {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let mut request = ApiRequest::new(method, url, body);
        if request.is_state_changing() {
            if let Some(token) = self.csrf_token(&request.url) {
                request.headers.insert(
                    HeaderName::from_static(CSRF_HEADER),
                    HeaderValue::from_str(&token)?,
                );
            }
        }

        let method = request.method.clone();
        let url = request.url.clone();
        tracing::debug!(method = %method, url = %url, "Sending API request");

        let response = match self.inner.transport.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(method = %method, url = %url, error = %e, "API error");
                return Err(e);
            }
        };

        if is_auth_failure(response.status) {
            self.report_auth_failure(response.status);
        }

        if !response.status.is_success() {
            tracing::warn!(
                method = %method,
                url = %url,
                status = %response.status,
                "API error"
            );
            return Err(GatewayError::Status {
                status: response.status,
                body: response.text(),
            });
        }

        Ok(response)
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
        self.send(Method::GET, path, query, Body::Empty).await
    }

    pub async fn post(&self, path: &str, body: Body) -> Result<ApiResponse> {
        self.send(Method::POST, path, &[], body).await
    }

    /// Send and return the body as opaque JSON
    pub async fn value(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Body,
    ) -> Result<Value> {
        self.send(method, path, query, body).await?.json_value()
    }

    fn report_auth_failure(&self, status: StatusCode) {
        let probe = self.inner.location.read().clone();
        if probe.is_some_and(|p| p.on_login_surface()) {
            tracing::debug!(status = %status, "Authorization failure on login surface");
            return;
        }

        tracing::info!(status = %status, "Authorization failure, invalidating session");
        self.inner.signal.emit();
    }
}

fn api_base(server_url: &str) -> Result<Url> {
    let mut server = Url::parse(server_url)?;
    if !server.path().ends_with('/') {
        let path = format!("{}/", server.path());
        server.set_path(&path);
    }
    Ok(server.join(API_PREFIX)?)
}

//! LocTur Request Gateway
//!
//! Uniform transport for every call the admin console makes:
//! - Requests carry the session cookie jar
//! - State-changing requests echo the `csrftoken` cookie as `X-CSRFToken`
//! - 401/403 responses broadcast a session invalidation, unless the
//!   console is already on the login surface
//!
//! The gateway knows nothing about the session store. The store registers
//! itself on [`AuthSignal`] instead.

mod csrf;
mod error;
mod gateway;
mod request;
mod signal;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod transport;

pub use csrf::{token_from_cookie_header, CSRF_COOKIE, CSRF_HEADER};
pub use error::GatewayError;
pub use gateway::{Gateway, LocationProbe, API_PREFIX};
pub use request::{ApiRequest, ApiResponse, Body, FormPart, FormValue};
pub use signal::{AuthSignal, Subscription};
pub use transport::{HttpTransport, Transport, TransportOptions};

pub use reqwest::cookie::Jar;
pub use reqwest::{Method, StatusCode};

pub type Result<T> = std::result::Result<T, GatewayError>;

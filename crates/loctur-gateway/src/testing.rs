//! In-memory transport for tests
//!
//! Responses are scripted per `(method, path)`. Each script is a queue; the
//! last entry keeps answering once the queue is drained. Unscripted routes
//! answer `404`. Every request is recorded.

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::error::GatewayError;
use crate::request::{ApiRequest, ApiResponse};
use crate::transport::Transport;
use crate::Result;

#[derive(Clone)]
enum Scripted {
    Respond(StatusCode, Vec<u8>),
    Fail(String),
    Gated(Arc<Notify>, StatusCode, Vec<u8>),
}

#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) -> &Self {
        self.routes
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
        self
    }

    pub fn respond_json(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        let body = body.to_string().into_bytes();
        self.push(method, path, Scripted::Respond(status_code(status), body))
    }

    pub fn respond_status(&self, method: Method, path: &str, status: u16) -> &Self {
        self.push(method, path, Scripted::Respond(status_code(status), Vec::new()))
    }

    /// Fail at the network level, as if the server were unreachable
    pub fn fail(&self, method: Method, path: &str, message: &str) -> &Self {
        self.push(method, path, Scripted::Fail(message.to_string()))
    }

    /// Hold the response until `gate` is notified
    pub fn respond_json_after(
        &self,
        method: Method,
        path: &str,
        gate: Arc<Notify>,
        status: u16,
        body: Value,
    ) -> &Self {
        self.push(
            method,
            path,
            Scripted::Gated(gate, status_code(status), body.to_string().into_bytes()),
        )
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    /// Requests whose URL path equals `path`
    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.url.path() == path)
            .cloned()
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn next(&self, method: &Method, path: &str) -> Option<Scripted> {
        let mut routes = self.routes.lock();
        let queue = routes.get_mut(&(method.clone(), path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let scripted = self.next(&request.method, request.url.path());
        self.requests.lock().push(request);

        match scripted {
            Some(Scripted::Respond(status, body)) => Ok(ApiResponse::new(status, body)),
            Some(Scripted::Gated(gate, status, body)) => {
                gate.notified().await;
                Ok(ApiResponse::new(status, body))
            }
            Some(Scripted::Fail(message)) => Err(GatewayError::Network {
                kind: "connect",
                message,
            }),
            None => Ok(ApiResponse::new(
                StatusCode::NOT_FOUND,
                br#"{"detail": "Not found."}"#.to_vec(),
            )),
        }
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

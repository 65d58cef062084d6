//! Console state container
//!
//! One [`Console`] per process. Views hold clones and go through it for
//! signing in and out, moving between screens, and reaching the resource
//! API.

use loctur_api::Api;
use loctur_gateway::{Body, Gateway, Jar, StatusCode, Transport};
use loctur_navigation::{Location, Navigator, Visit};
use loctur_session::{endpoints, AuthPhase, Session, SessionStore, User};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::watch;

use crate::config::Config;
use crate::credentials::Credentials;
use crate::error::CoreError;
use crate::Result;

/// `auth/login/` answer
#[derive(Debug, Default, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

#[derive(Clone)]
pub struct Console {
    config: Config,
    gateway: Gateway,
    session: SessionStore,
    navigator: Navigator,
    api: Api,
}

impl Console {
    /// Console talking to `config.server_url` over HTTP
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let gateway = Gateway::new(&config.server_url, &config.transport_options())?;
        Ok(Self::assemble(config, gateway))
    }

    /// Console over a caller-supplied transport
    pub fn with_transport(
        config: Config,
        jar: Arc<Jar>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        config.validate()?;
        let gateway = Gateway::with_transport(&config.server_url, jar, transport)?;
        Ok(Self::assemble(config, gateway))
    }

    fn assemble(config: Config, gateway: Gateway) -> Self {
        let navigator = Navigator::default();

        let probe = navigator.clone();
        gateway.set_location_probe(move || probe.on_login_surface());

        let session = SessionStore::new(gateway.clone());
        spawn_session_watcher(session.subscribe(), navigator.clone());

        let api = Api::new(gateway.clone());

        tracing::info!(server = %config.server_url, "Console created");

        Self {
            config,
            gateway,
            session,
            navigator,
            api,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Settle the session and land on the dashboard or the login screen
    pub async fn boot(&self) -> AuthPhase {
        self.session.initialize().await;

        let phase = self.session.phase();
        let landing = if phase == AuthPhase::Authenticated {
            Location::Dashboard
        } else {
            Location::Login
        };
        self.navigator.navigate(landing);

        tracing::info!(%phase, location = %landing, "Console booted");
        phase
    }

    /// Sign in with a username and password.
    ///
    /// Blank fields fail before anything is sent. A 400 from the server means
    /// the credentials were wrong.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Option<User>> {
        credentials.validate()?;

        if let Err(e) = self.gateway.get(endpoints::CSRF, &[]).await {
            tracing::debug!(error = %e, "CSRF token fetch failed");
        }

        let body = json!({
            "username": credentials.username,
            "password": credentials.password,
        });
        let response = match self.gateway.post(endpoints::LOGIN, Body::Json(body)).await {
            Ok(response) => response,
            Err(e) if e.status() == Some(StatusCode::BAD_REQUEST) => {
                tracing::info!(username = %credentials.username, "Login rejected");
                return Err(CoreError::InvalidCredentials);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login error");
                return Err(e.into());
            }
        };

        // Accepted either way; without a user record the session fetches one
        let login = response.json::<LoginResponse>().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Login answer without a readable user");
            LoginResponse::default()
        });
        tracing::info!(
            username = %credentials.username,
            detail = login.detail.as_deref().unwrap_or_default(),
            "Login successful"
        );

        self.session.login(login.user).await;
        if !self.session.is_authenticated() {
            return Err(CoreError::NotAuthenticated);
        }

        self.navigator.navigate(Location::Dashboard);
        Ok(self.session.user())
    }

    pub async fn sign_out(&self) {
        self.session.logout().await;
        self.navigator.navigate(Location::Login);
    }

    /// Move to `location`. Protected screens need a signed-in session;
    /// otherwise the console lands on the login screen instead.
    pub fn open(&self, location: Location) -> Result<Visit> {
        let phase = self.session.phase();

        if location.requires_auth() && phase != AuthPhase::Authenticated {
            tracing::debug!(%location, %phase, "Redirecting to login");
            self.navigator.navigate(Location::Login);
            return Err(CoreError::NotAuthenticated);
        }

        if location.is_login_surface() && phase == AuthPhase::Authenticated {
            return Ok(self.navigator.navigate(Location::Dashboard));
        }

        Ok(self.navigator.navigate(location))
    }

    /// Like [`open`](Self::open), from a path such as `/trips/<id>`
    pub fn open_path(&self, path: &str) -> Result<Visit> {
        self.open(Location::parse(path)?)
    }

    pub fn snapshot(&self) -> Session {
        self.session.snapshot()
    }
}

/// Follow the session and move to the login screen whenever a settled,
/// signed-out session meets a protected screen. Ends once the session store
/// is gone.
fn spawn_session_watcher(mut changes: watch::Receiver<Session>, navigator: Navigator) {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        tracing::debug!("No tokio runtime, session watcher not started");
        return;
    };

    runtime.spawn(async move {
        while changes.changed().await.is_ok() {
            let phase = changes.borrow_and_update().phase();
            let location = navigator.current();
            if phase == AuthPhase::Unauthenticated && location.requires_auth() {
                tracing::info!(from = %location, "Session lost, showing login");
                navigator.navigate(Location::Login);
            }
        }

        tracing::debug!("Session watcher stopped");
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use loctur_gateway::testing::ScriptedTransport;
    use loctur_gateway::Method;
    use std::time::Duration;

    const IDENTITY: &str = "/api/auth/user/";
    const LOGIN: &str = "/api/auth/login/";
    const CSRF: &str = "/api/auth/csrf/";

    fn test_console() -> (Console, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new());
        let console = Console::with_transport(
            Config::new("http://admin.test"),
            Arc::new(Jar::default()),
            Arc::clone(&transport) as Arc<dyn Transport>,
        )
        .unwrap();
        (console, transport)
    }

    fn admin() -> serde_json::Value {
        json!({"id": 1, "username": "admin", "is_staff": true})
    }

    async fn wait_for(console: &Console, location: Location) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while console.navigator().current() != location {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("navigator never reached location");
    }

    #[tokio::test]
    async fn test_boot_lands_by_session() {
        let (console, transport) = test_console();
        transport.respond_json(Method::GET, IDENTITY, 200, admin());
        assert_eq!(console.boot().await, AuthPhase::Authenticated);
        assert_eq!(console.navigator().current(), Location::Dashboard);

        let (console, transport) = test_console();
        transport.respond_status(Method::GET, IDENTITY, 401);
        assert_eq!(console.boot().await, AuthPhase::Unauthenticated);
        assert_eq!(console.navigator().current(), Location::Login);
    }

    #[tokio::test]
    async fn test_blank_sign_in_sends_nothing() {
        let (console, transport) = test_console();

        let err = console.sign_in(&Credentials::new("admin", "")).await.unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_sign_in_flow() {
        let (console, transport) = test_console();
        transport
            .respond_status(Method::GET, IDENTITY, 401)
            .respond_json(Method::GET, CSRF, 200, json!({"csrfToken": "abc"}))
            .respond_json(
                Method::POST,
                LOGIN,
                200,
                json!({"detail": "Login successful.", "user": admin()}),
            );
        console.boot().await;

        let user = console
            .sign_in(&Credentials::new("admin", "secret"))
            .await
            .unwrap();

        assert_eq!(user.unwrap().username, "admin");
        assert_eq!(console.session().phase(), AuthPhase::Authenticated);
        assert_eq!(console.navigator().current(), Location::Dashboard);

        let sent = transport.requests_to(LOGIN);
        assert!(matches!(
            &sent[0].body,
            Body::Json(v) if v["username"] == "admin" && v["password"] == "secret"
        ));
        assert_eq!(transport.requests_to(CSRF).len(), 1);
    }

    #[tokio::test]
    async fn test_sign_in_survives_csrf_failure() {
        let (console, transport) = test_console();
        transport
            .respond_status(Method::GET, IDENTITY, 401)
            .fail(Method::GET, CSRF, "connection reset")
            .respond_json(Method::POST, LOGIN, 200, json!({"user": admin()}));
        console.boot().await;

        assert!(console.sign_in(&Credentials::new("admin", "secret")).await.is_ok());
    }

    #[tokio::test]
    async fn test_sign_in_with_empty_login_answer_fetches_user() {
        let (console, transport) = test_console();
        transport
            .respond_status(Method::GET, IDENTITY, 401)
            .respond_json(Method::GET, IDENTITY, 200, admin())
            .respond_status(Method::POST, LOGIN, 200);
        console.boot().await;

        let user = console
            .sign_in(&Credentials::new("admin", "secret"))
            .await
            .unwrap();

        assert_eq!(user.unwrap().username, "admin");
        assert_eq!(console.session().phase(), AuthPhase::Authenticated);
        assert_eq!(transport.requests_to(IDENTITY).len(), 2);
        assert_eq!(console.navigator().current(), Location::Dashboard);
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let (console, transport) = test_console();
        transport
            .respond_status(Method::GET, IDENTITY, 401)
            .respond_json(
                Method::POST,
                LOGIN,
                400,
                json!({"detail": "Invalid credentials."}),
            );
        console.boot().await;

        let err = console
            .sign_in(&Credentials::new("admin", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidCredentials));
        assert_eq!(console.session().phase(), AuthPhase::Unauthenticated);
        assert_eq!(console.navigator().current(), Location::Login);
    }

    #[tokio::test]
    async fn test_login_rejection_on_login_screen_is_not_broadcast() {
        let (console, transport) = test_console();
        transport
            .respond_status(Method::GET, IDENTITY, 401)
            .respond_status(Method::POST, LOGIN, 403);
        console.boot().await;
        let changes = console.session().subscribe();

        let err = console
            .sign_in(&Credentials::new("admin", "secret"))
            .await
            .unwrap_err();

        assert!(err.is_auth_failure());
        assert!(!changes.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_open_gates_protected_screens() {
        let (console, transport) = test_console();
        transport.respond_status(Method::GET, IDENTITY, 401);
        console.boot().await;

        let err = console.open(Location::Trips).unwrap_err();
        assert!(matches!(err, CoreError::NotAuthenticated));
        assert_eq!(console.navigator().current(), Location::Login);

        let visit = console.open(Location::Login).unwrap();
        assert_eq!(visit.location(), Location::Login);
    }

    #[tokio::test]
    async fn test_open_while_signed_in() {
        let (console, transport) = test_console();
        transport.respond_json(Method::GET, IDENTITY, 200, admin());
        console.boot().await;

        let visit = console.open_path("/trips").unwrap();
        assert_eq!(visit.location(), Location::Trips);
        assert!(visit.is_current());

        let visit = console.open(Location::Login).unwrap();
        assert_eq!(visit.location(), Location::Dashboard);

        assert!(console.open_path("/nowhere").is_err());
    }

    #[tokio::test]
    async fn test_session_loss_shows_login() {
        let (console, transport) = test_console();
        transport
            .respond_json(Method::GET, IDENTITY, 200, admin())
            .respond_status(Method::GET, "/api/trips/", 401);
        console.boot().await;
        console.open(Location::Trips).unwrap();

        let err = console.api().trips().list(&[]).await.unwrap_err();

        assert!(err.is_auth_failure());
        assert_eq!(console.session().phase(), AuthPhase::Unauthenticated);
        wait_for(&console, Location::Login).await;
    }

    #[tokio::test]
    async fn test_sign_out() {
        let (console, transport) = test_console();
        transport
            .respond_json(Method::GET, IDENTITY, 200, admin())
            .respond_json(Method::POST, "/api/auth/logout/", 200, json!({}));
        console.boot().await;

        console.sign_out().await;

        assert_eq!(console.session().phase(), AuthPhase::Unauthenticated);
        assert_eq!(console.navigator().current(), Location::Login);
        assert!(console.snapshot().user.is_none());
    }
}

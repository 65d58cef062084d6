//! Session Store
//!
//! One store per process, shared by cloning the handle. State lives in a
//! `watch` channel so views can react to every change. The store registers
//! on the gateway's invalidation signal when constructed and stays
//! registered until the last handle is dropped.

use loctur_gateway::{Body, Gateway, StatusCode, Subscription};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::watch;

use crate::endpoints;
use crate::phase::AuthPhase;
use crate::session::Session;
use crate::user::User;

struct StoreInner {
    gateway: Gateway,
    state: watch::Sender<Session>,
    /// Advanced by every login, logout and invalidation
    epoch: AtomicU64,
    initialized: AtomicBool,
    _subscription: Subscription,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    /// Create the store in the `Booting` phase and subscribe it to the
    /// gateway's invalidation signal.
    pub fn new(gateway: Gateway) -> Self {
        let inner = Arc::new_cyclic(|weak: &Weak<StoreInner>| {
            let weak = weak.clone();
            let subscription = gateway.signal().subscribe(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.invalidate();
                }
            });

            let (state, _) = watch::channel(Session::booting());

            StoreInner {
                gateway,
                state,
                epoch: AtomicU64::new(0),
                initialized: AtomicBool::new(false),
                _subscription: subscription,
            }
        });

        Self { inner }
    }

    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    pub fn phase(&self) -> AuthPhase {
        self.inner.state.borrow().phase()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    pub fn user(&self) -> Option<User> {
        self.inner.state.borrow().user.clone()
    }

    pub fn gateway(&self) -> &Gateway {
        &self.inner.gateway
    }

    /// Settle the initial session by probing the server. Only the first call
    /// does anything.
    pub async fn initialize(&self) {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            tracing::warn!("Session store already initialized");
            return;
        }

        let epoch = self.inner.epoch();
        let user = self.inner.probe().await;
        self.inner.settle_probe(epoch, user, true);

        let session = self.snapshot();
        tracing::info!(
            authenticated = session.is_authenticated,
            user = session.user.as_ref().map(|u| u.username.as_str()),
            "Initialized session"
        );
    }

    /// Mark the session authenticated right away.
    ///
    /// The caller has already confirmed the login with the server. Without a
    /// user record the identity probe is re-run to fetch one, and a failing
    /// probe downgrades the session again.
    pub async fn login(&self, user: Option<User>) {
        let epoch = self.inner.advance_epoch();

        match user {
            Some(user) => {
                tracing::info!(user = %user.username, "Logged in");
                self.inner.update("login", |session| session.authenticate(Some(user)));
            }
            None => {
                self.inner.update("login", |session| session.authenticate(None));
                let user = self.inner.probe().await;
                self.inner.settle_probe(epoch, user, false);
            }
        }
    }

    /// End the session. The server call is best effort; local state is
    /// cleared whatever it answers.
    pub async fn logout(&self) {
        if let Err(e) = self.inner.gateway.post(endpoints::LOGOUT, Body::Empty).await {
            tracing::warn!(error = %e, "Logout error");
        }

        self.inner.advance_epoch();
        self.inner.update("logout", Session::clear);
    }

    /// Re-run the identity probe and apply its answer
    pub async fn check_auth_status(&self) {
        let epoch = self.inner.epoch();
        let user = self.inner.probe().await;
        self.inner.settle_probe(epoch, user, false);
    }
}

impl StoreInner {
    fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    fn advance_epoch(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Signal handler: drop the session locally, no server call
    fn invalidate(&self) {
        self.advance_epoch();
        if self.update("invalidated", Session::clear) {
            tracing::info!("Session invalidated by server response");
        }
    }

    async fn probe(&self) -> Option<User> {
        match self.gateway.get(endpoints::IDENTITY, &[]).await {
            Ok(response) if response.status == StatusCode::OK => match response.json::<User>() {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Identity probe returned an unreadable user");
                    None
                }
            },
            Ok(response) => {
                tracing::debug!(status = %response.status, "Not authenticated");
                None
            }
            Err(e) => {
                tracing::debug!(status = ?e.status(), error = %e, "Not authenticated");
                None
            }
        }
    }

    /// Apply a probe answer unless a login, logout or invalidation happened
    /// since it was sent. The initial probe clears `is_loading` regardless.
    fn settle_probe(&self, epoch: u64, user: Option<User>, initial: bool) {
        let stale = self.epoch() != epoch;
        if stale {
            tracing::debug!("Discarding stale identity probe answer");
        }

        self.update("probe", |session| {
            if !stale {
                match user {
                    Some(user) => session.authenticate(Some(user)),
                    None => session.clear(),
                }
            }
            if initial {
                session.is_loading = false;
            }
        });
    }

    /// Apply a change, rejecting anything the state machine forbids.
    /// Returns whether the session changed.
    fn update<F>(&self, reason: &'static str, apply: F) -> bool
    where
        F: FnOnce(&mut Session),
    {
        self.state.send_if_modified(|session| {
            let before = session.clone();
            apply(session);

            let (from, to) = (before.phase(), session.phase());
            if !from.can_transition_to(to) {
                tracing::error!(%from, %to, reason, "Rejected invalid session transition");
                *session = before;
                return false;
            }
            if from != to {
                tracing::info!(%from, %to, reason, "Session transition");
            }

            *session != before
        })
    }
}

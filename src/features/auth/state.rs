//! Auth session state shared by every page. The context is built once by the
//! application and handed to pages as cheap clones; all clones observe the same
//! committed [`AuthState`]. Only non-sensitive session metadata is kept in
//! memory; the session cookie stays in the HTTP client.
//!
//! `check_auth` runs the remote session check at most once per context:
//! concurrent callers wait for the in-flight check instead of issuing their own.
//! `refresh` forces a new check and commits in arrival order, so the state always
//! reflects the last response received. A response that was requested before a
//! `logout` or a login is dropped: local transitions outrank stale answers.

use crate::shared::AppError;
use crate::features::auth::client::AuthApi;
use crate::features::auth::types::{LoginRequest, UserSession};
use crate::navigation::Navigator;
use crate::routes::paths;
use serde::Serialize;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, PoisonError, RwLock, RwLockWriteGuard,
};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

/// What the client currently knows about the user's session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AuthState {
    pub logged_in: bool,
    pub auth_checked: bool,
}

impl AuthState {
    /// State after a settled session check.
    #[must_use]
    pub const fn checked(logged_in: bool) -> Self {
        Self {
            logged_in,
            auth_checked: true,
        }
    }
}

struct Inner {
    api: Arc<dyn AuthApi>,
    login_path: String,
    state: watch::Sender<AuthState>,
    session: RwLock<Option<UserSession>>,
    // bumped by logout and login; checks started under an older value are discarded
    generation: AtomicU64,
    checking: Mutex<()>,
}

/// Auth session context shared by pages and guards.
#[derive(Clone)]
pub struct AuthContext {
    inner: Arc<Inner>,
}

impl AuthContext {
    /// Builds an unchecked context around the auth collaborator.
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self::with_login_path(api, paths::LOGIN)
    }

    /// Context whose logout and guards send users to `login_path`.
    #[must_use]
    pub fn with_login_path(api: Arc<dyn AuthApi>, login_path: &str) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            inner: Arc::new(Inner {
                api,
                login_path: login_path.to_string(),
                state,
                session: RwLock::new(None),
                generation: AtomicU64::new(0),
                checking: Mutex::new(()),
            }),
        }
    }

    /// Page anonymous users are sent to.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.inner.login_path
    }

    /// Latest committed state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        *self.inner.state.borrow()
    }

    #[must_use]
    pub fn logged_in(&self) -> bool {
        self.state().logged_in
    }

    #[must_use]
    pub fn auth_checked(&self) -> bool {
        self.state().auth_checked
    }

    /// Receiver woken on every committed change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state.subscribe()
    }

    /// Session payload from the last successful check, if any.
    #[must_use]
    pub fn session(&self) -> Option<UserSession> {
        self.inner
            .session
            .read()
            .ok()
            .and_then(|session| session.clone())
    }

    /// Runs the session check unless one already settled. Never fails: any
    /// collaborator error is recorded as "not logged in".
    pub async fn check_auth(&self) {
        if self.auth_checked() {
            return;
        }

        let _checking = self.inner.checking.lock().await;
        if self.auth_checked() {
            debug!("session settled by a concurrent check");
            return;
        }

        self.run_check().await;
    }

    /// Re-validates the session even if a check already settled, e.g. after the
    /// profile or team changed.
    pub async fn refresh(&self) {
        self.run_check().await;
    }

    /// Marks the user as authenticated without asking the server, used right
    /// after the login form succeeded.
    pub fn mark_logged_in(&self) {
        let _session = self.lock_session();
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        self.commit(AuthState::checked(true));
    }

    /// Submits credentials and marks the user logged in on success. On failure
    /// the state is left untouched and the error is returned for the login form.
    ///
    /// # Errors
    /// Returns the collaborator's [`AppError`] when the login is rejected.
    pub async fn login(&self, request: &LoginRequest) -> Result<(), AppError> {
        self.inner.api.login(request).await?;
        info!(identifier = %request.identifier, "signed in");
        self.mark_logged_in();
        Ok(())
    }

    /// Ends the session. The server call is best-effort; the local state always
    /// becomes `logged_in = false` while `auth_checked` stays true, so guards
    /// redirect without re-querying. With a navigator, the user is sent to the
    /// context's login page unless already there.
    pub async fn logout(&self, navigator: Option<&dyn Navigator>) {
        if let Err(err) = self.inner.api.logout().await {
            debug!("logout request failed: {err}");
        }

        {
            let mut session = self.lock_session();
            self.inner.generation.fetch_add(1, Ordering::AcqRel);
            *session = None;
            self.commit(AuthState::checked(false));
        }
        info!("signed out");

        if let Some(navigator) = navigator {
            if navigator.current_path() != self.inner.login_path {
                navigator.push(&self.inner.login_path);
            }
        }
    }

    async fn run_check(&self) {
        let generation = self.inner.generation.load(Ordering::Acquire);
        let session = match self.inner.api.fetch_session().await {
            Ok(Some(session)) => {
                debug!(user = %session.username, "session valid");
                Some(session)
            }
            Ok(None) => {
                debug!("no active session");
                None
            }
            Err(err) => {
                warn!("session check failed: {err}");
                None
            }
        };

        let mut slot = self.lock_session();
        if self.inner.generation.load(Ordering::Acquire) != generation {
            debug!("discarding session check that predates a login or logout");
            return;
        }
        let logged_in = session.is_some();
        *slot = session;
        self.commit(AuthState::checked(logged_in));
    }

    // serializes session writes with their state commit
    fn lock_session(&self) -> RwLockWriteGuard<'_, Option<UserSession>> {
        self.inner
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // both fields are published in one send, readers never see a torn pair
    fn commit(&self, state: AuthState) {
        let previous = self.inner.state.send_replace(state);
        if previous != state {
            debug!(
                logged_in = state.logged_in,
                auth_checked = state.auth_checked,
                "auth state changed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::test_support::{FakeAuthApi, Outcome};
    use crate::navigation::{MemoryHistory, NavigationEvent};
    use tokio::task::JoinSet;

    #[tokio::test]
    async fn starts_unchecked() {
        let auth = AuthContext::new(FakeAuthApi::new(Outcome::Valid));
        assert_eq!(auth.state(), AuthState::default());
        assert!(auth.session().is_none());
    }

    #[tokio::test]
    async fn valid_session_marks_logged_in() {
        let api = FakeAuthApi::new(Outcome::Valid);
        let auth = AuthContext::new(api.clone());

        auth.check_auth().await;

        assert_eq!(auth.state(), AuthState::checked(true));
        assert_eq!(auth.session().map(|s| s.username), Some("alice".to_string()));
        assert_eq!(api.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn missing_or_failed_session_marks_logged_out() {
        for outcome in [Outcome::NoSession, Outcome::NetworkError] {
            let auth = AuthContext::new(FakeAuthApi::new(outcome));
            auth.check_auth().await;
            assert_eq!(auth.state(), AuthState::checked(false));
            assert!(auth.session().is_none());
        }
    }

    #[tokio::test]
    async fn check_auth_is_idempotent_once_settled() {
        let api = FakeAuthApi::new(Outcome::Valid);
        let auth = AuthContext::new(api.clone());

        auth.check_auth().await;
        api.set_outcome(Outcome::NoSession);
        auth.check_auth().await;

        assert_eq!(api.fetch_calls(), 1);
        assert!(auth.logged_in());
    }

    #[tokio::test]
    async fn concurrent_checks_share_one_request() {
        let api = FakeAuthApi::gated(Outcome::Valid);
        let auth = AuthContext::new(api.clone());

        let mut callers = JoinSet::new();
        for _ in 0..4 {
            let auth = auth.clone();
            callers.spawn(async move { auth.check_auth().await });
        }
        tokio::task::yield_now().await;
        assert!(!auth.auth_checked());

        api.release(1);
        while let Some(joined) = callers.join_next().await {
            joined.unwrap();
        }

        assert_eq!(api.fetch_calls(), 1);
        assert_eq!(auth.state(), AuthState::checked(true));
    }

    #[tokio::test]
    async fn refresh_reflects_the_latest_response() {
        let api = FakeAuthApi::new(Outcome::Valid);
        let auth = AuthContext::new(api.clone());
        auth.check_auth().await;

        api.set_outcome(Outcome::NoSession);
        auth.refresh().await;

        assert_eq!(api.fetch_calls(), 2);
        assert_eq!(auth.state(), AuthState::checked(false));
    }

    #[tokio::test]
    async fn subscribers_see_the_committed_pair() {
        let auth = AuthContext::new(FakeAuthApi::new(Outcome::Valid));
        let mut receiver = auth.subscribe();

        auth.check_auth().await;

        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), AuthState::checked(true));
    }

    #[tokio::test]
    async fn login_success_marks_logged_in() {
        let auth = AuthContext::new(FakeAuthApi::new(Outcome::NoSession));
        auth.login(&LoginRequest::new("alice", "secret"))
            .await
            .unwrap();
        assert_eq!(auth.state(), AuthState::checked(true));
    }

    #[tokio::test]
    async fn login_failure_leaves_state_untouched() {
        let api = FakeAuthApi::new(Outcome::NoSession);
        api.reject_logins();
        let auth = AuthContext::new(api);

        let err = auth
            .login(&LoginRequest::new("alice", "wrong"))
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(auth.state(), AuthState::default());
    }

    #[tokio::test]
    async fn logout_keeps_auth_checked_and_redirects() {
        let api = FakeAuthApi::new(Outcome::Valid);
        let auth = AuthContext::new(api.clone());
        auth.check_auth().await;

        let history = MemoryHistory::new("/pwn");
        auth.logout(Some(&history)).await;

        assert_eq!(auth.state(), AuthState::checked(false));
        assert!(auth.session().is_none());
        assert_eq!(api.logout_calls(), 1);
        assert_eq!(
            history.events(),
            vec![NavigationEvent::Push(paths::LOGIN.to_string())]
        );
    }

    #[tokio::test]
    async fn in_flight_check_does_not_undo_logout() {
        let api = FakeAuthApi::gated(Outcome::Valid);
        let auth = AuthContext::new(api.clone());

        let check = tokio::spawn({
            let auth = auth.clone();
            async move { auth.check_auth().await }
        });
        tokio::task::yield_now().await;
        assert_eq!(api.fetch_calls(), 1);

        auth.logout(None).await;
        api.release(1);
        check.await.unwrap();

        assert_eq!(auth.state(), AuthState::checked(false));
        assert!(auth.session().is_none());
    }

    #[tokio::test]
    async fn in_flight_check_does_not_undo_login() {
        let api = FakeAuthApi::gated(Outcome::NoSession);
        let auth = AuthContext::new(api.clone());

        let check = tokio::spawn({
            let auth = auth.clone();
            async move { auth.check_auth().await }
        });
        tokio::task::yield_now().await;

        auth.login(&LoginRequest::new("alice", "secret"))
            .await
            .unwrap();
        api.release(1);
        check.await.unwrap();

        assert_eq!(auth.state(), AuthState::checked(true));
    }

    #[tokio::test]
    async fn refresh_after_logout_is_committed() {
        let api = FakeAuthApi::new(Outcome::Valid);
        let auth = AuthContext::new(api.clone());
        auth.logout(None).await;

        auth.refresh().await;

        assert_eq!(auth.state(), AuthState::checked(true));
    }

    #[tokio::test]
    async fn logout_uses_the_configured_login_path() {
        let auth = AuthContext::with_login_path(FakeAuthApi::new(Outcome::Valid), "/sign-in");
        auth.check_auth().await;

        let history = MemoryHistory::new("/team");
        auth.logout(Some(&history)).await;

        assert_eq!(auth.login_path(), "/sign-in");
        assert_eq!(
            history.events(),
            vec![NavigationEvent::Push("/sign-in".to_string())]
        );
    }

    #[tokio::test]
    async fn logout_swallows_server_errors_and_stays_on_login() {
        let api = FakeAuthApi::new(Outcome::Valid);
        api.fail_logouts();
        let auth = AuthContext::new(api);
        auth.check_auth().await;

        let history = MemoryHistory::new(paths::LOGIN);
        auth.logout(Some(&history)).await;

        assert!(!auth.logged_in());
        assert!(history.events().is_empty());
    }
}

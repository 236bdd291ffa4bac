use crate::features::auth::state::{AuthContext, AuthState};
use crate::navigation::Navigator;
use serde::Serialize;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Where a protected page stands for one activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Unchecked,
    Checking,
    Authorized,
    Unauthorized,
}

impl RouteStatus {
    /// Status of an activated guard for a committed auth state.
    #[must_use]
    pub const fn from_state(state: AuthState) -> Self {
        match (state.auth_checked, state.logged_in) {
            (false, _) => Self::Checking,
            (true, true) => Self::Authorized,
            (true, false) => Self::Unauthorized,
        }
    }
}

struct Gate {
    navigator: Arc<dyn Navigator>,
    redirect_to: String,
    mounted: AtomicBool,
    redirected: AtomicBool,
}

impl Gate {
    /// Applies the redirect rule to a committed state. Returns true once the
    /// activation reached its terminal state.
    fn evaluate(&self, state: AuthState) -> bool {
        if RouteStatus::from_state(state) != RouteStatus::Unauthorized {
            return false;
        }
        // unmounted pages never navigate
        if self.mounted.load(Ordering::Acquire) && !self.redirected.swap(true, Ordering::AcqRel) {
            info!(to = %self.redirect_to, "no session, redirecting");
            self.navigator.replace(&self.redirect_to);
        }
        true
    }
}

/// Guard for pages that require a session.
///
/// UX-only: the real access control lives on the API.
pub struct ProtectedRoute {
    auth: AuthContext,
    gate: Arc<Gate>,
    watcher: Option<JoinHandle<()>>,
}

impl ProtectedRoute {
    /// Guard that sends anonymous users to the context's login page.
    #[must_use]
    pub fn new(auth: AuthContext, navigator: Arc<dyn Navigator>) -> Self {
        let login_path = auth.login_path().to_string();
        Self::with_redirect(auth, navigator, &login_path)
    }

    /// Guard that sends anonymous users to `redirect_to` instead of the login page.
    #[must_use]
    pub fn with_redirect(
        auth: AuthContext,
        navigator: Arc<dyn Navigator>,
        redirect_to: &str,
    ) -> Self {
        Self {
            auth,
            gate: Arc::new(Gate {
                navigator,
                redirect_to: redirect_to.to_string(),
                mounted: AtomicBool::new(true),
                redirected: AtomicBool::new(false),
            }),
            watcher: None,
        }
    }

    /// Mounts the guard: triggers the session check and starts watching the
    /// shared state. Calling it again is a no-op.
    ///
    /// Must be called from within a tokio runtime.
    pub fn activate(&mut self) {
        if self.watcher.is_some() {
            return;
        }

        // detached: the check keeps updating shared state even if this page goes away
        let auth = self.auth.clone();
        tokio::spawn(async move { auth.check_auth().await });

        let mut receiver = self.auth.subscribe();
        let gate = Arc::clone(&self.gate);
        self.watcher = Some(tokio::spawn(async move {
            loop {
                let state = *receiver.borrow_and_update();
                if gate.evaluate(state) {
                    break;
                }
                if receiver.changed().await.is_err() {
                    break;
                }
            }
        }));
        debug!("protected route activated");
    }

    #[must_use]
    pub fn status(&self) -> RouteStatus {
        if self.watcher.is_none() {
            return RouteStatus::Unchecked;
        }
        RouteStatus::from_state(self.auth.state())
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        !self.auth.auth_checked()
    }

    #[must_use]
    pub fn logged_in(&self) -> bool {
        self.auth.logged_in()
    }

    #[must_use]
    pub fn auth_checked(&self) -> bool {
        self.auth.auth_checked()
    }

    /// Whether this activation already sent the user to the login page.
    #[must_use]
    pub fn redirected(&self) -> bool {
        self.gate.redirected.load(Ordering::Acquire)
    }

    /// Produces the protected content only when the session is confirmed;
    /// `None` means render the neutral placeholder.
    pub fn render<T>(&self, content: impl FnOnce() -> T) -> Option<T> {
        (self.status() == RouteStatus::Authorized).then(content)
    }

    /// Waits until the session check settles. An unauthorized outcome has
    /// already been redirected when this returns.
    pub async fn settled(&self) -> RouteStatus {
        if self.watcher.is_none() {
            return RouteStatus::Unchecked;
        }

        let mut receiver = self.auth.subscribe();
        let state = match receiver.wait_for(|state| state.auth_checked).await {
            Ok(state) => *state,
            Err(_) => self.auth.state(),
        };
        self.gate.evaluate(state);
        RouteStatus::from_state(state)
    }
}

impl Drop for ProtectedRoute {
    fn drop(&mut self) {
        self.gate.mounted.store(false, Ordering::Release);
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
    }
}

use crate::features::auth::{AuthContext, ProtectedRoute, RouteStatus};
use crate::navigation::{MemoryHistory, Navigator};
use crate::routes::Route;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Result of navigating to a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Visit {
    pub requested: String,
    pub route: Route,
    /// `None` for public pages, which mount no guard.
    pub status: Option<RouteStatus>,
    /// Where the browser ended up.
    pub location: String,
    /// Whether the page content (rather than a placeholder) was rendered.
    pub rendered: bool,
}

/// Application shell: one auth context and one history shared by every page.
#[derive(Clone)]
pub struct App {
    auth: AuthContext,
    history: MemoryHistory,
}

impl App {
    #[must_use]
    pub fn new(auth: AuthContext, history: MemoryHistory) -> Self {
        Self { auth, history }
    }

    #[must_use]
    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    #[must_use]
    pub fn history(&self) -> &MemoryHistory {
        &self.history
    }

    /// Navigates to `path` and mounts its page. Protected pages wait for the
    /// session check; anonymous users end up on the login page.
    #[instrument(skip(self))]
    pub async fn visit(&self, path: &str) -> Visit {
        self.history.push(path);
        let route = Route::resolve(path);

        if !route.requires_auth() {
            debug!(%route, "public page");
            return Visit {
                requested: path.to_string(),
                route,
                status: None,
                location: self.history.current_path(),
                rendered: true,
            };
        }

        let navigator: Arc<dyn Navigator> = Arc::new(self.history.clone());
        let mut guard = ProtectedRoute::new(self.auth.clone(), navigator);
        guard.activate();
        let status = guard.settled().await;
        let rendered = guard.render(|| ()).is_some();

        Visit {
            requested: path.to_string(),
            route,
            status: Some(status),
            location: self.history.current_path(),
            rendered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::test_support::{FakeAuthApi, Outcome};
    use crate::routes::paths;

    #[tokio::test]
    async fn public_pages_render_without_a_check() {
        let api = FakeAuthApi::new(Outcome::NoSession);
        let app = App::new(AuthContext::new(api.clone()), MemoryHistory::default());

        let visit = app.visit("/register").await;

        assert_eq!(visit.route, Route::Register);
        assert_eq!(visit.status, None);
        assert!(visit.rendered);
        assert_eq!(api.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn protected_page_renders_for_a_valid_session() {
        let app = App::new(
            AuthContext::new(FakeAuthApi::new(Outcome::Valid)),
            MemoryHistory::default(),
        );

        let visit = app.visit("/pwn/web").await;

        assert_eq!(visit.status, Some(RouteStatus::Authorized));
        assert_eq!(visit.location, "/pwn/web");
        assert!(visit.rendered);
    }

    #[tokio::test]
    async fn protected_page_sends_anonymous_users_to_login() {
        let app = App::new(
            AuthContext::new(FakeAuthApi::new(Outcome::NoSession)),
            MemoryHistory::default(),
        );

        let visit = app.visit("/admin/dashboard").await;

        assert_eq!(visit.status, Some(RouteStatus::Unauthorized));
        assert_eq!(visit.location, paths::LOGIN);
        assert!(!visit.rendered);
        assert_eq!(app.history().entries(), vec!["/", paths::LOGIN]);
    }

    #[tokio::test]
    async fn configured_login_path_is_used() {
        let auth = AuthContext::with_login_path(FakeAuthApi::new(Outcome::NoSession), "/sign-in");
        let app = App::new(auth.clone(), MemoryHistory::default());

        let visit = app.visit("/notifications").await;
        assert_eq!(visit.location, "/sign-in");

        // logout goes to the same place
        app.visit("/").await;
        auth.logout(Some(app.history())).await;
        assert_eq!(app.history().current_path(), "/sign-in");
    }

    #[tokio::test]
    async fn session_is_checked_once_across_pages() {
        let api = FakeAuthApi::new(Outcome::Valid);
        let app = App::new(AuthContext::new(api.clone()), MemoryHistory::default());

        app.visit("/pwn").await;
        app.visit("/scoreboard").await;
        app.visit("/team").await;

        assert_eq!(api.fetch_calls(), 1);
    }
}

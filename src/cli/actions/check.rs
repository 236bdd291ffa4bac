use crate::{
    cli::globals::GlobalArgs,
    features::auth::{AuthContext, AuthState, HttpAuthApi, UserSession},
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
}

/// Session state as printed by `check`.
#[derive(Debug, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub state: AuthState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<UserSession>,
}

/// Builds the shared auth context for the configured backend.
///
/// # Errors
/// Returns an error if the API client cannot be built.
pub fn auth_context(globals: &GlobalArgs) -> Result<AuthContext> {
    let client = globals
        .api_client()
        .context("failed to configure the API client")?;
    let config = globals.config();
    debug!(api = %client.base_url(), login = %config.login_path, "using API");
    Ok(AuthContext::with_login_path(
        Arc::new(HttpAuthApi::new(client)),
        &config.login_path,
    ))
}

/// Runs one session check.
///
/// # Errors
/// Returns an error if the API client cannot be built.
pub async fn report(args: &Args) -> Result<Report> {
    let auth = auth_context(&args.globals)?;
    auth.check_auth().await;

    Ok(Report {
        state: auth.state(),
        session: auth.session(),
    })
}

/// Execute the check action.
/// # Errors
/// Returns an error if the client cannot be configured or the report cannot be encoded.
pub async fn execute(args: Args) -> Result<()> {
    let report = report(&args).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn args_for(server: &MockServer, cookie: Option<&str>) -> Args {
        let mut globals = GlobalArgs::new(server.uri());
        if let Some(cookie) = cookie {
            globals.set_session_cookie(SecretString::from(cookie));
        }
        Args { globals }
    }

    #[tokio::test]
    async fn reports_logged_in_user() {
        if !can_bind_localhost() {
            eprintln!("Skipping check report test: cannot bind to localhost");
            return;
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/me"))
            .and(header("cookie", "session=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "username": "alice",
                "email": "alice@example.org",
                "role": "member"
            })))
            .mount(&server)
            .await;

        let report = report(&args_for(&server, Some("session=abc"))).await.unwrap();

        assert_eq!(report.state, AuthState::checked(true));
        let encoded = serde_json::to_value(&report).unwrap();
        assert_eq!(encoded["logged_in"], true);
        assert_eq!(encoded["auth_checked"], true);
        assert_eq!(encoded["session"]["username"], "alice");
    }

    #[tokio::test]
    async fn reports_anonymous_without_session() {
        if !can_bind_localhost() {
            eprintln!("Skipping check report test: cannot bind to localhost");
            return;
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let report = report(&args_for(&server, None)).await.unwrap();

        assert_eq!(report.state, AuthState::checked(false));
        let encoded = serde_json::to_value(&report).unwrap();
        assert!(encoded.get("session").is_none());
    }

    #[test]
    fn login_path_flows_into_the_context() {
        let mut globals = GlobalArgs::new("https://ctf.example.org".to_string());
        globals.login_path = Some("/sign-in".to_string());

        let auth = auth_context(&globals).unwrap();

        assert_eq!(auth.login_path(), "/sign-in");
    }

    #[test]
    fn invalid_api_url_is_an_error() {
        let globals = GlobalArgs::new("not a url".to_string());
        assert!(auth_context(&globals).is_err());
    }
}

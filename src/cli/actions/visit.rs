use crate::{
    app::{App, Visit},
    cli::{actions::check::auth_context, globals::GlobalArgs},
    navigation::MemoryHistory,
    routes::paths,
};
use anyhow::Result;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub path: String,
}

/// Opens the app at the home page and navigates to the requested path.
///
/// # Errors
/// Returns an error if the API client cannot be built.
pub async fn visit(args: &Args) -> Result<Visit> {
    let auth = auth_context(&args.globals)?;
    let app = App::new(auth, MemoryHistory::new(paths::HOME));

    let visit = app.visit(&args.path).await;
    info!(
        requested = %visit.requested,
        location = %visit.location,
        rendered = visit.rendered,
        "visit finished"
    );
    Ok(visit)
}

/// Execute the visit action.
/// # Errors
/// Returns an error if the client cannot be configured or the result cannot be encoded.
pub async fn execute(args: Args) -> Result<()> {
    let visit = visit(&args).await?;
    println!("{}", serde_json::to_string_pretty(&visit)?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::features::auth::RouteStatus;
    use std::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[tokio::test]
    async fn expired_session_lands_on_login() {
        if !can_bind_localhost() {
            eprintln!("Skipping visit test: cannot bind to localhost");
            return;
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/me"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let args = Args {
            globals: GlobalArgs::new(server.uri()),
            path: "/scoreboard".to_string(),
        };
        let visit = visit(&args).await.unwrap();

        assert_eq!(visit.status, Some(RouteStatus::Unauthorized));
        assert_eq!(visit.location, paths::LOGIN);
        assert!(!visit.rendered);
    }

    #[tokio::test]
    async fn public_page_skips_the_session_check() {
        if !can_bind_localhost() {
            eprintln!("Skipping visit test: cannot bind to localhost");
            return;
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/me"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let args = Args {
            globals: GlobalArgs::new(server.uri()),
            path: paths::REGISTER.to_string(),
        };
        let visit = visit(&args).await.unwrap();

        assert_eq!(visit.status, None);
        assert!(visit.rendered);
    }
}

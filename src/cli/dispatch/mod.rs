//! Maps validated CLI matches to the action the binary executes.

use crate::cli::{
    actions::{check, visit, Action},
    commands::{
        ARG_API_URL, ARG_LOGIN_PATH, ARG_PATH, ARG_SESSION_COOKIE, ARG_TIMEOUT, CMD_CHECK,
        CMD_VISIT,
    },
    globals::GlobalArgs,
};
use anyhow::{anyhow, bail, Context, Result};
use secrecy::SecretString;

fn globals(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let api_url = matches
        .get_one::<String>(ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url")?;

    let mut globals = GlobalArgs::new(api_url);
    globals.timeout_seconds = matches.get_one::<u64>(ARG_TIMEOUT).copied().unwrap_or(0);
    globals.login_path = matches.get_one::<String>(ARG_LOGIN_PATH).cloned();

    if let Some(cookie) = matches
        .get_one::<String>(ARG_SESSION_COOKIE)
        .filter(|cookie| !cookie.trim().is_empty())
    {
        globals.set_session_cookie(SecretString::from(cookie.trim().to_string()));
    }

    Ok(globals)
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let globals = globals(matches)?;

    match matches.subcommand() {
        Some((CMD_CHECK, _)) => Ok(Action::Check(check::Args { globals })),
        Some((CMD_VISIT, sub_m)) => {
            let path = sub_m
                .get_one::<String>(ARG_PATH)
                .cloned()
                .context("missing required argument: <path>")?;
            if !path.starts_with('/') {
                bail!("page path must start with '/': {path}");
            }
            Ok(Action::Visit(visit::Args { globals, path }))
        }
        Some((name, _)) => Err(anyhow!("unknown subcommand: {name}")),
        None => Err(anyhow!("missing subcommand")),
    }
}

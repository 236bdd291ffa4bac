pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_COOKIE: &str = "session-cookie";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_LOGIN_PATH: &str = "login-path";
pub const ARG_PATH: &str = "path";

pub const CMD_CHECK: &str = "check";
pub const CMD_VISIT: &str = "visit";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("pwnthemall-web")
        .about("Session gate for the pwnthemall CTF frontend")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .short('a')
                .long("api-url")
                .help("Base URL of the pwnthemall frontend/API")
                .default_value(crate::shared::config::DEFAULT_API_BASE_URL)
                .env("PWNTHEMALL_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_COOKIE)
                .short('c')
                .long("session-cookie")
                .help("Session cookie sent to the API, example: session=<value>")
                .env("PWNTHEMALL_SESSION_COOKIE")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .short('t')
                .long("timeout")
                .help("Request timeout in seconds")
                .default_value("10")
                .env("PWNTHEMALL_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_LOGIN_PATH)
                .long("login-path")
                .help("Page anonymous users are sent to")
                .env("PWNTHEMALL_LOGIN_PATH")
                .global(true),
        )
        .subcommand(Command::new(CMD_CHECK).about("Check the session and print the auth state"))
        .subcommand(
            Command::new(CMD_VISIT)
                .about("Navigate to a page through the session gate")
                .arg(
                    Arg::new(ARG_PATH)
                        .help("Page path, example: /scoreboard")
                        .required(true),
                ),
        );

    logging::with_args(command)
}

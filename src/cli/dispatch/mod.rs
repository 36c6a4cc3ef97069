//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary executes, pulling the
//! token secret into a [`SecretString`] as early as possible.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{ARG_CORS_ORIGIN, ARG_DSN, ARG_PORT, ARG_TOKEN_SECRET};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);

    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;

    let token_secret = matches
        .get_one::<String>(ARG_TOKEN_SECRET)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --token-secret")?;

    let cors_origins: Vec<String> = matches
        .get_many::<String>(ARG_CORS_ORIGIN)
        .map(|values| values.map(String::to_string).collect())
        .unwrap_or_default();

    Ok(Action::Server(Args {
        port,
        dsn,
        token_secret,
        cors_origins,
    }))
}

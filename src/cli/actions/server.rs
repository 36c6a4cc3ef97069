use crate::{api, cli::globals::GlobalArgs};
use anyhow::Result;
use secrecy::SecretString;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub token_secret: SecretString,
    pub cors_origins: Vec<String>,
}

/// Execute the server action.
///
/// # Errors
/// Returns an error if the database connection or the listener setup fails.
pub async fn execute(args: Args) -> Result<()> {
    let globals = GlobalArgs::new(args.token_secret);

    api::new(args.port, args.dsn, &globals, args.cors_origins).await?;

    Ok(())
}

use secrecy::SecretString;

/// Process-wide configuration injected at startup.
///
/// The token secret is read once from the CLI/environment and never mutated,
/// so concurrent handlers can read it without synchronization.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub token_secret: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(token_secret: SecretString) -> Self {
        Self { token_secret }
    }
}

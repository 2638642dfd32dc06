use crate::config::PasswordHashingConfig;
use crate::domain::user::ports::PasswordHasher;
use crate::user::errors::AuthError;

/// Argon2id password hasher backed by the shared `auth` library.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    inner: auth::PasswordHasher,
}

impl Argon2PasswordHasher {
    /// Build a hasher with the configured Argon2id cost parameters.
    ///
    /// # Errors
    /// * `Password` - Parameters are outside Argon2's accepted ranges
    pub fn from_config(config: &PasswordHashingConfig) -> Result<Self, AuthError> {
        let inner = auth::PasswordHasher::with_params(
            config.memory_kib,
            config.iterations,
            config.parallelism,
        )
        .map_err(|e| AuthError::Password(e.to_string()))?;

        Ok(Self { inner })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        self.inner.hash(password).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AuthError::Password(e.to_string())
        })
    }

    fn matches(&self, password: &str, digest: &str) -> Result<bool, AuthError> {
        self.inner.verify(password, digest).map_err(|e| {
            tracing::error!(error = %e, "Stored password digest could not be verified");
            AuthError::Password(e.to_string())
        })
    }
}

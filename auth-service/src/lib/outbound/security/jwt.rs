use auth::Claims;
use auth::JwtError;
use auth::JwtHandler;
use chrono::Duration;

use crate::config::JwtConfig;
use crate::domain::user::models::AccessToken;
use crate::domain::user::ports::TokenIssuer;
use crate::user::errors::AuthError;

/// HS256 JWT issuer.
///
/// Tokens carry `sub` (username), `role` (role claim), `iat`, `exp` and, when
/// configured, `iss`.
pub struct JwtTokenIssuer {
    handler: JwtHandler,
    lifetime: Duration,
    issuer: Option<String>,
}

impl JwtTokenIssuer {
    pub fn new(secret: &[u8], lifetime: Duration, issuer: Option<String>) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            lifetime,
            issuer,
        }
    }

    /// # Errors
    /// * `Token` - `expiration_hours` does not fit a token lifetime
    pub fn from_config(config: &JwtConfig) -> Result<Self, AuthError> {
        let lifetime = Duration::try_hours(config.expiration_hours).ok_or_else(|| {
            AuthError::Token(format!(
                "Token lifetime out of range: {} hours",
                config.expiration_hours
            ))
        })?;

        Ok(Self::new(
            config.secret.as_bytes(),
            lifetime,
            config.issuer.clone(),
        ))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, subject: &str, role_claim: &str) -> Result<AccessToken, AuthError> {
        let token_error = |e: JwtError| {
            tracing::error!(error = %e, "Token generation failed");
            AuthError::Token(e.to_string())
        };

        let mut claims = Claims::for_subject(subject, self.lifetime)
            .map_err(token_error)?
            .with_role(role_claim);
        if let Some(issuer) = &self.issuer {
            claims = claims.with_issuer(issuer);
        }

        self.handler
            .encode(&claims)
            .map(AccessToken::new)
            .map_err(token_error)
    }
}

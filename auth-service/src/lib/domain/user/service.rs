use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::AuthError;
use crate::user::errors::CredentialsFailure;
use crate::user::ports::AuthServicePort;
use crate::user::ports::PasswordHasher;
use crate::user::ports::TokenIssuer;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication.
///
/// Concrete implementation of AuthServicePort. The credential store, password
/// hasher and token issuer are all injected at construction.
pub struct AuthService<UR, PH, TI>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TI: TokenIssuer,
{
    repository: Arc<UR>,
    password_hasher: Arc<PH>,
    token_issuer: Arc<TI>,
}

impl<UR, PH, TI> AuthService<UR, PH, TI>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TI: TokenIssuer,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store
    /// * `password_hasher` - Password digest implementation
    /// * `token_issuer` - Access token signer
    pub fn new(repository: Arc<UR>, password_hasher: Arc<PH>, token_issuer: Arc<TI>) -> Self {
        Self {
            repository,
            password_hasher,
            token_issuer,
        }
    }
}

#[async_trait]
impl<UR, PH, TI> AuthServicePort for AuthService<UR, PH, TI>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TI: TokenIssuer,
{
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AccessToken, AuthError> {
        // A username that could never have been registered cannot match a user
        let Ok(username) = Username::new(username.to_string()) else {
            tracing::debug!("Authentication rejected: malformed username");
            return Err(AuthError::InvalidCredentials(
                CredentialsFailure::UserNotFound,
            ));
        };

        let user = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or_else(|| {
                tracing::debug!(username = %username, "Authentication failed: user not found");
                AuthError::InvalidCredentials(CredentialsFailure::UserNotFound)
            })?;

        if !self.password_hasher.matches(password, &user.password_hash)? {
            tracing::debug!(username = %username, "Authentication failed: wrong password");
            return Err(AuthError::InvalidCredentials(
                CredentialsFailure::WrongPassword,
            ));
        }

        let token = self
            .token_issuer
            .issue(user.username.as_str(), &user.role.claim())?;

        tracing::debug!(username = %user.username, role = %user.role, "Access token issued");

        Ok(token)
    }

    async fn register(&self, command: RegisterUserCommand) -> Result<(), AuthError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateUser(command.username.to_string()));
        }

        let password_hash = self.password_hasher.hash(command.password.expose())?;

        let user = User::new(command.username, password_hash, command.role);

        // The store re-checks uniqueness, so a concurrent registration still fails here
        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            role = %created_user.role,
            "User registered"
        );

        Ok(())
    }
}

use async_trait::async_trait;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::AuthError;

/// Port for authentication domain service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `username` - Raw username as supplied by the caller
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Signed access token for the stored username and role
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password
    /// * `Password` / `Token` / `DatabaseError` - A collaborator failed
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<AccessToken, AuthError>;

    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated username, password and role
    ///
    /// # Errors
    /// * `DuplicateUser` - Username is already taken
    /// * `Password` / `DatabaseError` - A collaborator failed
    async fn register(&self, command: RegisterUserCommand) -> Result<(), AuthError>;
}

/// Persistence operations for user credentials.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user if its username is free.
    ///
    /// Check and insert happen atomically at the storage layer.
    ///
    /// # Errors
    /// * `DuplicateUser` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;
}

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Produce an opaque digest for storage.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Compare a plaintext password against a stored digest.
    fn matches(&self, password: &str, digest: &str) -> Result<bool, AuthError>;
}

/// Signed token issuance.
pub trait TokenIssuer: Send + Sync + 'static {
    /// Issue a token asserting `subject` with a single role claim.
    fn issue(&self, subject: &str, role_claim: &str) -> Result<AccessToken, AuthError>;
}

use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::PasswordPolicyError;
use crate::user::errors::RoleError;
use crate::user::errors::UsernameError;

/// Prefix prepended to a role when it is embedded in a token.
pub const ROLE_CLAIM_PREFIX: &str = "ROLE_";

/// User aggregate entity.
///
/// Represents a registered user and its stored credentials.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new user from a hashed password.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `password_hash` - Digest produced by the password hasher
    /// * `role` - Normalized role
    pub fn new(username: Username, password_hash: String, role: Role) -> Self {
        Self {
            id: UserId::new(),
            username,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Kept exactly as supplied (no trimming or case folding). Must be 1-64
/// characters with no whitespace or control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 64;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Username is the empty string
    /// * `TooLong` - Username longer than 64 characters
    /// * `InvalidCharacters` - Contains whitespace or control characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length == 0 {
            return Err(UsernameError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if username
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(Self(username))
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role value type
///
/// Normalized to upper case on construction, so `"admin"` and `"Admin"` are the same role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role(String);

impl Role {
    const MAX_LENGTH: usize = 32;

    /// Create a new role, upper-casing it.
    ///
    /// # Errors
    /// * `Empty` - Role is the empty string
    /// * `TooLong` - Role longer than 32 characters
    /// * `InvalidCharacters` - Contains anything but ASCII letters, digits and `_`
    pub fn new(role: String) -> Result<Self, RoleError> {
        if role.is_empty() {
            return Err(RoleError::Empty);
        }
        if !role.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(RoleError::InvalidCharacters);
        }
        if role.len() > Self::MAX_LENGTH {
            return Err(RoleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: role.len(),
            });
        }

        Ok(Self(role.to_ascii_uppercase()))
    }

    /// Get role as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Role as embedded in an access token, e.g. `ROLE_ADMIN`.
    pub fn claim(&self) -> String {
        format!("{}{}", ROLE_CLAIM_PREFIX, self.0)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password supplied at registration.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `Empty` - Password is the empty string
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Signed access token handed to the caller after a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub password: Password,
    pub role: Role,
}

impl RegisterUserCommand {
    /// Construct a new registration command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `password` - Plain text password (will be hashed by service)
    /// * `role` - Normalized role
    pub fn new(username: Username, password: Password, role: Role) -> Self {
        Self {
            username,
            password,
            role,
        }
    }
}

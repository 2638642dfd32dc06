use std::fmt;

use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must not be empty")]
    Empty,

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Username must not contain whitespace or control characters")]
    InvalidCharacters,
}

/// Error for Role validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Role must not be empty")]
    Empty,

    #[error("Role too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Role contains invalid characters (only ASCII letters, digits and underscore allowed)")]
    InvalidCharacters,
}

/// Error for registration password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must not be empty")]
    Empty,
}

/// Why a set of credentials was rejected.
///
/// Only used to build the error message; callers must treat every variant the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsFailure {
    UserNotFound,
    WrongPassword,
}

impl fmt::Display for CredentialsFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialsFailure::UserNotFound => f.write_str("user not found"),
            CredentialsFailure::WrongPassword => f.write_str("wrong password"),
        }
    }
}

/// Top-level error for all authentication operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(CredentialsFailure),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    // Collaborator failures
    #[error("Password hashing failed: {0}")]
    Password(String),

    #[error("Token issuance failed: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

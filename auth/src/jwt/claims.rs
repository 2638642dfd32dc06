use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Claim key carrying the authorization role.
pub const ROLE_CLAIM: &str = "role";

/// JWT claims structure.
///
/// Registered RFC 7519 claims plus custom fields via `extra` map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user/entity identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for an authenticated subject.
    ///
    /// # Arguments
    /// * `subject` - Identity the token asserts (the username)
    /// * `lifetime` - Time until the token expires
    ///
    /// # Returns
    /// Claims with sub, iat and exp set
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry falls outside the representable time range
    pub fn for_subject(subject: impl ToString, lifetime: Duration) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(lifetime).ok_or_else(|| {
            JwtError::EncodingFailed(format!("Token lifetime out of range: {}", lifetime))
        })?;

        Ok(Self {
            sub: Some(subject.to_string()),
            exp: Some(expires_at.timestamp()),
            iat: Some(now.timestamp()),
            ..Self::default()
        })
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl ToString) -> Self {
        self.iss = Some(iss.to_string());
        self
    }

    /// Set the role claim.
    pub fn with_role(self, role: impl ToString) -> Self {
        self.with_extra(ROLE_CLAIM, role.to_string())
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Get the role claim, if present.
    pub fn role(&self) -> Option<&str> {
        self.extra.get(ROLE_CLAIM).and_then(|v| v.as_str())
    }
}

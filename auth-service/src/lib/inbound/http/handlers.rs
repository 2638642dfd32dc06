use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::user::errors::AuthError;

pub mod health;
pub mod login;
pub mod register;

/// Plain-text success response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSuccess(StatusCode, String);

impl ApiSuccess {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        ApiSuccess(status, body.into())
    }
}

impl IntoResponse for ApiSuccess {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, message).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials(_) => ApiError::Unauthorized(err.to_string()),
            AuthError::DuplicateUser(_)
            | AuthError::InvalidUsername(_)
            | AuthError::InvalidRole(_)
            | AuthError::InvalidPassword(_) => ApiError::BadRequest(err.to_string()),
            AuthError::Password(_) | AuthError::Token(_) | AuthError::DatabaseError(_) => {
                tracing::error!(error = %err, "Request failed on a dependency");
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

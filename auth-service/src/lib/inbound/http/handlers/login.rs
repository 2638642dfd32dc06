use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Verify credentials and return the signed token as the response body.
///
/// Credentials are read from the query string, falling back to a
/// url-encoded form body.
pub async fn login(
    State(state): State<AppState>,
    query: Option<Query<LoginParams>>,
    form: Option<Form<LoginParams>>,
) -> Result<ApiSuccess, ApiError> {
    let params = query
        .map(|Query(params)| params)
        .or_else(|| form.map(|Form(params)| params))
        .ok_or_else(|| {
            ApiError::BadRequest(
                "Missing required parameters: username and password".to_string(),
            )
        })?;

    state
        .auth_service
        .authenticate(&params.username, &params.password)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token.into_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginParams {
    username: String,
    password: String,
}

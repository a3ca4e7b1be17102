use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::instrument;

use super::dto::{LoginRequest, TokenResponse};
use crate::{
    error::{AppError, AppJson},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let (email, password) = payload.validate().map_err(AppError::Validation)?;
    let access_token = state.auth.login(email, password).await?;
    Ok((StatusCode::CREATED, Json(TokenResponse { access_token })))
}

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
    Extension, Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CreateUserRequest, PublicUser, UserDetails},
    services,
};
use crate::{
    auth::guard::{require_auth, AuthUser},
    error::{AppError, AppJson, AppPath},
    state::AppState,
};

/// Registration is public; reads need a token. The guard sits on the method
/// handlers so unsupported methods still get 405.
pub fn routes(state: &AppState) -> Router<AppState> {
    let guard = middleware::from_fn_with_state(state.clone(), require_auth);
    Router::new()
        .route(
            "/users",
            get(list_users).route_layer(guard.clone()).post(create_user),
        )
        .route("/users/:id", get(get_user).route_layer(guard))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let reg = payload.validate().map_err(AppError::Validation)?;
    let user = services::register(state.users.as_ref(), &state.hasher, reg).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(_caller): Extension<AuthUser>,
) -> Result<Json<Vec<UserDetails>>, AppError> {
    let users = services::list(state.users.as_ref(), state.posts.as_ref()).await?;
    Ok(Json(
        users
            .into_iter()
            .map(|(user, posts)| UserDetails {
                user: user.into(),
                posts: posts.into_iter().map(Into::into).collect(),
            })
            .collect(),
    ))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(_caller): Extension<AuthUser>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<UserDetails>, AppError> {
    let (user, posts) =
        services::find_by_id(state.users.as_ref(), state.posts.as_ref(), id).await?;
    Ok(Json(UserDetails {
        user: user.into(),
        posts: posts.into_iter().map(Into::into).collect(),
    }))
}

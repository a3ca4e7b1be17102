use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
    Extension, Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CreatePostRequest, CreatedPostResponse, PostResponse},
    services,
};
use crate::{
    auth::guard::{require_auth, AuthUser},
    error::{AppError, AppJson},
    state::AppState,
};

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new().route(
        "/posts",
        get(list_posts)
            .post(create_post)
            .route_layer(middleware::from_fn_with_state(state.clone(), require_auth)),
    )
}

#[instrument(skip(state, payload), fields(user_id = caller.id))]
pub async fn create_post(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    AppJson(payload): AppJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatedPostResponse>), AppError> {
    let draft = payload.validate().map_err(AppError::Validation)?;
    let post = services::create(state.posts.as_ref(), &caller, draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedPostResponse {
            id: post.id,
            message: "Post created successfully",
        }),
    ))
}

#[instrument(skip(state, _caller))]
pub async fn list_posts(
    State(state): State<AppState>,
    Extension(_caller): Extension<AuthUser>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = services::list_all(state.posts.as_ref()).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

use anyhow::Context;
use tracing::{info, warn};

use super::{
    dto::Registration,
    repo_types::{NewUser, User},
};
use crate::{
    auth::password::Hasher,
    error::AppError,
    posts::repo_types::Post,
    store::{PostStore, UserStore},
};

/// Hashes the password off the async runtime and inserts the user. A duplicate
/// email is reported by the store's unique constraint.
pub async fn register(
    users: &dyn UserStore,
    hasher: &Hasher,
    reg: Registration,
) -> Result<User, AppError> {
    let hasher = hasher.clone();
    let Registration {
        name,
        email,
        password,
        gender,
    } = reg;

    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .context("password hashing task")?
        .context("hash password")?;

    let user = users
        .create_user(NewUser {
            name,
            email,
            gender,
            password_hash,
        })
        .await
        .map_err(|e| {
            let e = AppError::from(e);
            if matches!(e, AppError::DuplicateEmail) {
                warn!("email already registered");
            }
            e
        })?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(user)
}

pub async fn find_by_id(
    users: &dyn UserStore,
    posts: &dyn PostStore,
    id: i32,
) -> Result<(User, Vec<Post>), AppError> {
    let user = users
        .find_user_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    let posts = posts.list_posts_by_user(user.id).await?;
    Ok((user, posts))
}

/// Every user with their posts.
pub async fn list(
    users: &dyn UserStore,
    posts: &dyn PostStore,
) -> Result<Vec<(User, Vec<Post>)>, AppError> {
    let users = users.list_users().await?;
    let mut out = Vec::with_capacity(users.len());
    for user in users {
        let own = posts.list_posts_by_user(user.id).await?;
        out.push((user, own));
    }
    Ok(out)
}

use tracing::info;

use super::{
    dto::PostDraft,
    repo_types::{NewPost, Post, PostWithAuthor},
};
use crate::{auth::guard::AuthUser, error::AppError, store::PostStore};

/// The author is always the verified caller.
pub async fn create(
    posts: &dyn PostStore,
    author: &AuthUser,
    draft: PostDraft,
) -> Result<Post, AppError> {
    let post = posts
        .create_post(NewPost {
            title: draft.title,
            content: draft.content,
            user_id: author.id,
        })
        .await?;
    info!(post_id = post.id, user_id = author.id, email = %author.email, "post created");
    Ok(post)
}

pub async fn list_all(posts: &dyn PostStore) -> Result<Vec<PostWithAuthor>, AppError> {
    Ok(posts.list_posts_with_author().await?)
}

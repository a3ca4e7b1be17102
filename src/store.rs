use async_trait::async_trait;
use thiserror::Error;

use crate::{
    posts::repo_types::{NewPost, Post, PostWithAuthor},
    users::repo_types::{NewUser, User},
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("referenced user does not exist")]
    UnknownUser,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classifies constraint violations reported by the database.
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return StoreError::DuplicateEmail;
            }
            if db.is_foreign_key_violation() {
                return StoreError::UnknownUser;
            }
        }
        StoreError::Database(e)
    }
}

/// Credential store. Email uniqueness is enforced here, not by callers.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, StoreError>;
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create_post(&self, new: NewPost) -> Result<Post, StoreError>;
    async fn list_posts_with_author(&self) -> Result<Vec<PostWithAuthor>, StoreError>;
    async fn list_posts_by_user(&self, user_id: i32) -> Result<Vec<Post>, StoreError>;
}

use sqlx::FromRow;
use time::OffsetDateTime;

/// Post record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user_id: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub user_id: i32,
}

/// Post joined with its author's display name.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthor {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub author_name: String,
}

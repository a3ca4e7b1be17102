use async_trait::async_trait;

use crate::{
    db::PgStore,
    posts::repo_types::{NewPost, Post, PostWithAuthor},
    store::{PostStore, StoreError},
};

#[async_trait]
impl PostStore for PgStore {
    async fn create_post(&self, new: NewPost) -> Result<Post, StoreError> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, user_id, created_at, updated_at
            "#,
        )
        .bind(&new.title)
        .bind(&new.content)
        .bind(new.user_id)
        .fetch_one(&self.db)
        .await
        .map_err(StoreError::from_sqlx)
    }

    async fn list_posts_with_author(&self) -> Result<Vec<PostWithAuthor>, StoreError> {
        let rows = sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.id, p.title, p.content, p.created_at, p.updated_at,
                   u.name AS author_name
            FROM posts p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn list_posts_by_user(&self, user_id: i32) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, user_id, created_at, updated_at
            FROM posts
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}

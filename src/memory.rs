//! In-process store behind the same traits as [`crate::db::PgStore`].

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::{
    posts::repo_types::{NewPost, Post, PostWithAuthor},
    store::{PostStore, StoreError, UserStore},
    users::repo_types::{NewUser, User},
};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        // check and insert under one lock, like a unique index
        let mut t = self.inner.lock().await;
        if t.users.iter().any(|u| u.email == new.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: t.users.len() as i32 + 1,
            name: new.name,
            email: new.email,
            gender: new.gender,
            password_hash: new.password_hash,
            created_at: now,
            updated_at: now,
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let t = self.inner.lock().await;
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let t = self.inner.lock().await;
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.lock().await.users.clone())
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn create_post(&self, new: NewPost) -> Result<Post, StoreError> {
        let mut t = self.inner.lock().await;
        if !t.users.iter().any(|u| u.id == new.user_id) {
            return Err(StoreError::UnknownUser);
        }
        let now = OffsetDateTime::now_utc();
        let post = Post {
            id: t.posts.len() as i32 + 1,
            title: new.title,
            content: new.content,
            user_id: new.user_id,
            created_at: now,
            updated_at: now,
        };
        t.posts.push(post.clone());
        Ok(post)
    }

    async fn list_posts_with_author(&self) -> Result<Vec<PostWithAuthor>, StoreError> {
        let t = self.inner.lock().await;
        let rows = t
            .posts
            .iter()
            .rev()
            .filter_map(|p| {
                let author = t.users.iter().find(|u| u.id == p.user_id)?;
                Some(PostWithAuthor {
                    id: p.id,
                    title: p.title.clone(),
                    content: p.content.clone(),
                    created_at: p.created_at,
                    updated_at: p.updated_at,
                    author_name: author.name.clone(),
                })
            })
            .collect();
        Ok(rows)
    }

    async fn list_posts_by_user(&self, user_id: i32) -> Result<Vec<Post>, StoreError> {
        let t = self.inner.lock().await;
        Ok(t.posts.iter().rev().filter(|p| p.user_id == user_id).cloned().collect())
    }
}

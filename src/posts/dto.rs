use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    posts::repo_types::PostWithAuthor,
    validation::{char_len_between, require},
};

/// Request body for `POST /posts`. There is deliberately no author field:
/// the author is the authenticated caller, and unknown keys such as `userId`
/// are dropped during deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<PostDraft, Vec<String>> {
        let mut errors = Vec::new();

        let title = require(self.title.as_deref(), "Title", &mut errors);
        if let Some(title) = title {
            if !char_len_between(title, 1, 255) {
                errors.push("Title must be between 1 and 255 characters".into());
            }
        }
        let content = require(self.content.as_deref(), "Content", &mut errors);

        match (title, content) {
            (Some(title), Some(content)) if errors.is_empty() => Ok(PostDraft {
                title: title.to_string(),
                content: content.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedPostResponse {
    pub id: i32,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PostAuthor {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub user: PostAuthor,
}

impl From<PostWithAuthor> for PostResponse {
    fn from(p: PostWithAuthor) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            created_at: p.created_at,
            updated_at: p.updated_at,
            user: PostAuthor {
                name: p.author_name,
            },
        }
    }
}

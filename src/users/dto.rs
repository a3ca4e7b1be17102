use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    posts::repo_types::Post,
    users::repo_types::{Gender, User},
    validation::{char_len_between, is_valid_email, normalize_email, require},
};

/// Request body for `POST /users`. Fields are optional so that missing ones
/// come back as validation messages instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub gender: Option<String>,
}

/// Registration input that passed validation.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub gender: Option<Gender>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<Registration, Vec<String>> {
        let mut errors = Vec::new();

        let name = require(self.name.as_deref(), "Name", &mut errors).map(str::trim);
        if let Some(name) = name {
            if !char_len_between(name, 2, 50) {
                errors.push("Name must be between 2 and 50 characters long".into());
            }
        }

        let email = require(self.email.as_deref(), "Email", &mut errors).map(normalize_email);
        if let Some(email) = &email {
            if !is_valid_email(email) {
                errors.push("Invalid email format".into());
            }
        }

        let password = require(self.password.as_deref(), "Password", &mut errors);
        if let Some(password) = password {
            if password.chars().count() < 8 {
                errors.push("Password must be at least 8 characters long".into());
            } else if password.chars().count() > 100 {
                errors.push("Password must be at most 100 characters long".into());
            }
        }

        let gender = match self.gender.as_deref() {
            None => None,
            Some(g) => match Gender::parse(g) {
                Some(g) => Some(g),
                None => {
                    errors.push("Gender must be one of: male, female".into());
                    None
                }
            },
        };

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) if errors.is_empty() => Ok(Registration {
                name: name.to_string(),
                email,
                password: password.to_string(),
                gender,
            }),
            _ => Err(errors),
        }
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub gender: Option<Gender>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            gender: u.gender,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPost {
    pub id: i32,
    pub title: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Post> for UserPost {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDetails {
    #[serde(flatten)]
    pub user: PublicUser,
    pub posts: Vec<UserPost>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: Some(name.into()),
            email: Some(email.into()),
            password: Some(password.into()),
            gender: None,
        }
    }

    #[test]
    fn accepts_valid_registration_and_normalizes_email() {
        let reg = request("Test User", " TestUser@Example.com ", "password123")
            .validate()
            .expect("valid");
        assert_eq!(reg.name, "Test User");
        assert_eq!(reg.email, "testuser@example.com");
        assert_eq!(reg.gender, None);
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = CreateUserRequest::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec!["Name is required", "Email is required", "Password is required"]
        );
    }

    #[test]
    fn reports_field_constraints() {
        let errors = request("A", "not-an-email", "short").validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Name must be between 2 and 50 characters long",
                "Invalid email format",
                "Password must be at least 8 characters long",
            ]
        );
    }

    #[test]
    fn gender_is_optional_but_checked() {
        let mut req = request("Test User", "a@b.co", "password123");
        req.gender = Some("female".into());
        assert_eq!(req.validate().unwrap().gender, Some(Gender::Female));

        req.gender = Some("other".into());
        assert_eq!(
            req.validate().unwrap_err(),
            vec!["Gender must be one of: male, female"]
        );
    }

    #[test]
    fn public_user_never_carries_the_hash() {
        let user = User {
            id: 1,
            name: "Test User".into(),
            email: "test@example.com".into(),
            gender: Some(Gender::Male),
            password_hash: "$argon2id$secret".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("\"gender\":\"male\""));
        assert!(!json.contains("argon2"));
    }
}

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use super::{
    jwt::JwtKeys,
    password::{Hasher, PasswordError},
};
use crate::{error::AppError, store::UserStore, validation::normalize_email};

/// Login orchestration: credential lookup, password check, token issuance.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Hasher,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, hasher: Hasher, keys: JwtKeys) -> Self {
        Self { users, hasher, keys }
    }

    /// Returns a signed access token. Every authentication failure is
    /// [`AppError::InvalidCredentials`]; only infrastructure faults differ.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_user_by_email(&email).await? else {
            warn!(%email, "login unknown email");
            return Err(AppError::InvalidCredentials);
        };

        let hasher = self.hasher.clone();
        let plain = password.to_owned();
        let stored = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&plain, &stored))
            .await
            .context("password verification task")?;

        match verified {
            Ok(true) => {}
            Ok(false) => {
                warn!(%email, user_id = user.id, "login invalid password");
                return Err(AppError::InvalidCredentials);
            }
            Err(e @ PasswordError::MalformedHash(_)) => {
                error!(error = %e, user_id = user.id, "stored password hash is corrupt");
                return Err(AppError::InvalidCredentials);
            }
            Err(e) => return Err(anyhow::Error::new(e).context("verify password").into()),
        }

        let token = self.keys.issue(user.id, &user.email).map_err(|e| {
            error!(error = %e, user_id = user.id, "jwt sign failed");
            AppError::Internal(anyhow::Error::new(e).context("sign access token"))
        })?;

        info!(user_id = user.id, email = %user.email, "user logged in");
        Ok(token)
    }
}

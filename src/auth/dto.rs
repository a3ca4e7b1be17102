use serde::{Deserialize, Serialize};

use crate::validation::require;

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Only presence is checked; a malformed email simply fails to authenticate.
    pub fn validate(&self) -> Result<(&str, &str), Vec<String>> {
        let mut errors = Vec::new();
        let email = require(self.email.as_deref(), "Email", &mut errors);
        let password = require(self.password.as_deref(), "Password", &mut errors);
        match (email, password) {
            (Some(e), Some(p)) => Ok((e, p)),
            _ => Err(errors),
        }
    }
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        let req = LoginRequest::default();
        assert_eq!(
            req.validate().unwrap_err(),
            vec!["Email is required", "Password is required"]
        );
    }

    #[test]
    fn token_response_shape() {
        let json = serde_json::to_value(TokenResponse { access_token: "t".into() }).unwrap();
        assert_eq!(json, serde_json::json!({ "access_token": "t" }));
    }
}

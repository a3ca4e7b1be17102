use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::jwt::{JwtKeys, TokenError};
use crate::error::{AppError, AuthError};

/// Verified caller identity, placed in request extensions by [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
}

/// Returns the token of a `Bearer <token>` authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Rejects the request unless it carries a valid access token.
pub async fn require_auth(
    State(keys): State<JwtKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or(AuthError::MissingToken)?;

    let claims = keys.verify(token).map_err(|e| {
        warn!(error = %e, "rejected bearer token");
        match e {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Invalid(_) => AuthError::TokenInvalid,
            TokenError::Claims(_) | TokenError::Signing(_) => AuthError::Unauthorized,
        }
    })?;

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        email: claims.email,
    });
    Ok(next.run(req).await)
}

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Request,
    },
    http::{Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Failures of the bearer-token guard. Each one answers 401 with its own message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing authorization token")]
    MissingToken,
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token")]
    TokenInvalid,
    #[error("Unauthorized access")]
    Unauthorized,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Messages that are safe to show a client.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AppError::Validation(errors) => errors.clone(),
            AppError::Internal(_) => vec!["Internal Server Error".to_string()],
            other => vec![other.to_string()],
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AppError::DuplicateEmail,
            StoreError::UnknownUser => AppError::NotFound("User not found".into()),
            StoreError::Database(e) => AppError::Internal(anyhow::Error::new(e).context("store")),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(vec![rejection.body_text()])
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(vec![rejection.body_text()])
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub path: String,
    pub errors: Vec<String>,
}

/// Carried on error responses so [`with_request_path`] can rebuild the body with the path.
#[derive(Debug, Clone)]
struct ErrorMessages(Vec<String>);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let AppError::Internal(e) = &self {
            error!(error = %format!("{e:#}"), "request failed");
        }
        let errors = self.messages();
        let body = ErrorBody {
            status_code: status.as_u16(),
            path: String::new(),
            errors: errors.clone(),
        };
        let mut res = (status, Json(body)).into_response();
        res.extensions_mut().insert(ErrorMessages(errors));
        res
    }
}

/// Fills `path` into error bodies produced anywhere below this layer.
pub async fn with_request_path(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let mut res = next.run(req).await;
    match res.extensions_mut().remove::<ErrorMessages>() {
        Some(ErrorMessages(errors)) => {
            let status = res.status();
            let body = ErrorBody {
                status_code: status.as_u16(),
                path,
                errors,
            };
            (status, Json(body)).into_response()
        }
        None => res,
    }
}

pub async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("Cannot {} {}", method, uri.path()))
}

/// `Json` whose rejection is an [`AppError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path` whose rejection is an [`AppError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            AppError::Validation(vec!["x".into()]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::DuplicateEmail.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Auth(AuthError::TokenExpired).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("User not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_do_not_leak_detail() {
        let err = AppError::Internal(anyhow::anyhow!("connection refused at 10.0.0.3"));
        assert_eq!(err.messages(), vec!["Internal Server Error".to_string()]);
    }

    #[test]
    fn guard_errors_have_distinct_messages() {
        let messages: Vec<String> = [
            AuthError::MissingToken,
            AuthError::TokenExpired,
            AuthError::TokenInvalid,
            AuthError::Unauthorized,
        ]
        .into_iter()
        .map(|e| AppError::from(e).messages().remove(0))
        .collect();
        assert_eq!(
            messages,
            vec![
                "Missing authorization token",
                "Token has expired",
                "Invalid token",
                "Unauthorized access",
            ]
        );
    }

    #[test]
    fn store_errors_map_to_domain_errors() {
        assert!(matches!(
            AppError::from(StoreError::DuplicateEmail),
            AppError::DuplicateEmail
        ));
        assert!(matches!(
            AppError::from(StoreError::UnknownUser),
            AppError::NotFound(ref m) if m == "User not found"
        ));
    }

    #[test]
    fn error_body_uses_camel_case() {
        let body = ErrorBody {
            status_code: 401,
            path: "/posts".into(),
            errors: vec!["Invalid token".into()],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["statusCode"], 401);
        assert_eq!(json["path"], "/posts");
        assert_eq!(json["errors"][0], "Invalid token");
    }
}

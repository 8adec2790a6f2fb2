//! Authentication and authorization at the HTTP seam
//!
//! Extractors resolve the bearer token to the live session user; they
//! are the only authorization boundary, and every privileged handler
//! goes through them.

use crate::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
};
use protrade_core::{Role, UserRecord};
use protrade_platform::PlatformError;
use serde_json::json;
use tracing::warn;

/// The authenticated session user
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

/// The authenticated session user, demanded to hold the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub UserRecord);

/// Redirect to the entry page for requests without a session
#[derive(Debug)]
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::temporary("/").into_response()
    }
}

/// Role check failure with a user-visible message
#[derive(Debug)]
pub struct RoleDenied {
    pub required_role: Role,
    pub national_id: String,
}

impl IntoResponse for RoleDenied {
    fn into_response(self) -> Response {
        (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "unauthorized_access",
                "message": format!(
                    "User '{}' does not have the required role: {}",
                    self.national_id, self.required_role
                ),
            })),
        )
            .into_response()
    }
}

/// Extract the bearer token from request headers
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
}

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let Some(token) = extract_bearer_token(&parts.headers) else {
            return Err(AuthRedirect);
        };

        match app_state.platform.session_user_for_token(token) {
            Some(user) => Ok(CurrentUser(user)),
            None => Err(AuthRedirect),
        }
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state)
            .await
            .map_err(|redirect| redirect.into_response())?;

        if user.is_admin() {
            Ok(AdminUser(user))
        } else {
            warn!("Admin access required but user '{}' is not admin", user.national_id);
            Err(RoleDenied {
                required_role: Role::Admin,
                national_id: user.national_id,
            }
            .into_response())
        }
    }
}

/// Platform errors mapped onto HTTP responses
#[derive(Debug)]
pub struct ApiError(pub PlatformError);

impl From<PlatformError> for ApiError {
    fn from(err: PlatformError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            PlatformError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_failed"),
            PlatformError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            PlatformError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "unauthorized"),
            PlatformError::Forbidden { .. } => (StatusCode::FORBIDDEN, "forbidden"),
            PlatformError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = Json(json!({
            "error": error_code,
            "message": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WebConfig;
    use axum::{body::Body, http::Request};
    use protrade_platform::{LoginRequest, RegisterRequest};

    fn test_state() -> AppState {
        AppState::new(WebConfig::default()).unwrap()
    }

    fn parts_with_token(token: Option<&str>) -> Parts {
        let mut builder = Request::builder().method("GET").uri("/test");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let (parts, _) = builder.body(Body::empty()).unwrap().into_parts();
        parts
    }

    fn login_as_user(state: &AppState) -> String {
        state
            .platform
            .register(RegisterRequest {
                national_id: "11111111111".to_string(),
                name: "Test User".to_string(),
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
            })
            .unwrap();
        state
            .platform
            .login(LoginRequest {
                national_id: "11111111111".to_string(),
                password: "password123".to_string(),
            })
            .unwrap()
            .token
    }

    #[tokio::test]
    async fn test_current_user_with_valid_token() {
        let state = test_state();
        let token = login_as_user(&state);

        let mut parts = parts_with_token(Some(&token));
        let result = CurrentUser::from_request_parts(&mut parts, &state).await;

        let CurrentUser(user) = result.unwrap();
        assert_eq!(user.national_id, "11111111111");
    }

    #[tokio::test]
    async fn test_current_user_without_token_is_rejected() {
        let state = test_state();
        login_as_user(&state);

        let mut parts = parts_with_token(None);
        let result = CurrentUser::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_current_user_with_stale_token_is_rejected() {
        let state = test_state();
        let token = login_as_user(&state);
        state.platform.logout().unwrap();

        let mut parts = parts_with_token(Some(&token));
        let result = CurrentUser::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_admin_extractor_rejects_regular_user() {
        let state = test_state();
        let token = login_as_user(&state);

        let mut parts = parts_with_token(Some(&token));
        let result = AdminUser::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_admin_extractor_accepts_admin() {
        let state = test_state();
        let token = state
            .platform
            .login(LoginRequest {
                national_id: "00000000000".to_string(),
                password: "admin".to_string(),
            })
            .unwrap()
            .token;

        let mut parts = parts_with_token(Some(&token));
        let result = AdminUser::from_request_parts(&mut parts, &state).await;

        let AdminUser(user) = result.unwrap();
        assert!(user.is_admin());
    }
}

//! Bearer-token authentication middleware.

use crate::auth::jwt::validate_token;
use crate::error::HttpAppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use clipvault_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
}

/// Authenticated caller, stored in request extensions by `auth_middleware`.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub user_id: Uuid,
}

// Extracted from request parts rather than via Extension so handlers can
// combine it with Multipart.
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| {
                HttpAppError(AppError::Unauthorized(
                    "Missing authentication context".to_string(),
                ))
            })
    }
}

/// Validate the `Authorization: Bearer <token>` header and attach an
/// `AuthContext` to the request. Requests without a valid token get a 401.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Some(token) => token,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing or malformed Authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let claims = match validate_token(&auth_state.jwt_secret, token) {
        Ok(claims) => claims,
        Err(err) => return HttpAppError(err).into_response(),
    };

    request
        .extensions_mut()
        .insert(AuthContext { user_id: claims.sub });

    next.run(request).await
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

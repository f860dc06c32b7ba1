use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
};
use std::sync::Arc;
use tracing::warn;

use super::{ApiError, AppState};
use crate::api::types::{LoginRequest, LoginResponse, UserResponse};
use crate::auth::{fallback_token, parse_fallback_token};

/// POST /api/auth/login-json
///
/// Store path verifies the Argon2id hash and issues a signed token. The
/// fallback path compares plaintext against the static user table and issues
/// the legacy `token_<username>_<id>` form. Wrong credentials are a 401 on
/// both paths; only a store *failure* degrades, and only in fallback mode.
pub async fn login_json(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    if let Some(store) = state.store() {
        match store
            .verify_user_password(&payload.username, &payload.password)
            .await
        {
            Ok(Some(user)) => {
                let token = state
                    .tokens()
                    .issue(&user.username, user.id, &user.role)
                    .map_err(|e| ApiError::internal(format!("Failed to issue token: {e}")))?;

                return Ok(Json(LoginResponse {
                    access_token: token,
                    token_type: "bearer".to_string(),
                    expires_in: state.tokens().ttl_seconds(),
                    user: user.into(),
                }));
            }
            Ok(None) => return Err(ApiError::InvalidCredentials),
            Err(e) => {
                if !state.fallback_enabled() {
                    return Err(ApiError::StoreUnavailable(format!("{e:#}")));
                }
                warn!("Login store path failed, checking fallback credentials: {e:#}");
                metrics::counter!("fallback_responses_total", "endpoint" => "auth_login")
                    .increment(1);
            }
        }
    }

    let user = state
        .fallback()
        .verify(&payload.username, &payload.password)
        .ok_or(ApiError::InvalidCredentials)?;

    Ok(Json(LoginResponse {
        access_token: fallback_token(user.username, user.id),
        token_type: "bearer".to_string(),
        expires_in: state.tokens().ttl_seconds(),
        user: user.into(),
    }))
}

/// GET /api/auth/me
///
/// Legacy tokens are honored only in fallback mode and must match a known
/// fallback user exactly. Signed tokens are verified (signature + expiry)
/// and resolved against the store; identity is never served from substitute
/// data, so a store failure here is a 500, not a degraded 200.
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::InvalidToken)?;

    if token.starts_with("token_") {
        if !state.fallback_enabled() {
            return Err(ApiError::InvalidToken);
        }

        let (username, id) = parse_fallback_token(token).ok_or(ApiError::InvalidToken)?;
        let user = state
            .fallback()
            .user(username)
            .filter(|u| u.id == id)
            .ok_or(ApiError::InvalidToken)?;

        return Ok(Json(UserResponse::from(user)));
    }

    let claims = state
        .tokens()
        .verify(token)
        .map_err(|_| ApiError::InvalidToken)?;

    let store = state.store().ok_or(ApiError::InvalidToken)?;
    let user = store
        .get_user_by_username(&claims.sub)
        .await
        .map_err(|e| ApiError::StoreUnavailable(format!("{e:#}")))?
        .ok_or(ApiError::InvalidToken)?;

    Ok(Json(user.into()))
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer token_admin_1".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("token_admin_1"));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcg==".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}

//! Registration, login and the session gate

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::error::{ApiError, ApiJson, ApiResult};
use super::session::token_from_headers;
use super::{run_blocking, AppState};
use crate::models::UserId;
use crate::services::UserService;

/// The logged-in user, inserted into request extensions by `require_session`
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub mobile: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    run_blocking(&state, move |state| {
        UserService::new(&state.storage).register(
            &payload.username,
            &payload.password,
            &payload.mobile,
        )
    })
    .await?;
    Ok(Json(
        json!({ "success": true, "message": "Registration successful" }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Response> {
    if payload.mobile.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Mobile number and password are required".into(),
        ));
    }

    let user = run_blocking(&state, move |state| {
        UserService::new(&state.storage).authenticate(&payload.mobile, &payload.password)
    })
    .await?;

    state.sessions.prune();
    let token = state.sessions.create(&user);

    Ok((
        [(SET_COOKIE, state.sessions.cookie_for(&token))],
        Json(json!({ "success": true })),
    )
        .into_response())
}

pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = token_from_headers(&headers) {
        state.sessions.destroy(&token);
    }

    (
        [(SET_COOKIE, state.sessions.clearing_cookie())],
        Json(json!({ "success": true })),
    )
        .into_response()
}

pub async fn check_auth(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<AuthStatus> {
    let session = token_from_headers(&headers).and_then(|token| state.sessions.get(&token));
    Json(AuthStatus {
        authenticated: session.is_some(),
        username: session.map(|s| s.username),
    })
}

/// Reject requests without a live session; otherwise attach `CurrentUser`
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let session = token_from_headers(request.headers())
        .and_then(|token| state.sessions.get(&token))
        .ok_or(ApiError::Unauthorized)?;

    request.extensions_mut().insert(CurrentUser {
        id: session.user_id,
        username: session.username,
    });
    Ok(next.run(request).await)
}

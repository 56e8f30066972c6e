//! API models for authentication endpoints.

use crate::api::models::users::UserResponse;
use axum::{
    Json,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to register a new account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to log in with email and password
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication payload.
///
/// The token is returned both here (for API clients) and as an HTTP-only
/// session cookie (for browsers).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub message: String,
    pub access_token: String,
    pub token_type: String,
}

/// Generic success message for auth operations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthSuccessResponse {
    pub message: String,
}

/// Registration response: 201 with the auth payload and a session cookie
pub struct RegisterResponse {
    pub auth_response: AuthResponse,
    pub cookie: String,
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, [(SET_COOKIE, self.cookie)], Json(self.auth_response)).into_response()
    }
}

/// Login response: 200 with the auth payload and a session cookie
pub struct LoginResponse {
    pub auth_response: AuthResponse,
    pub cookie: String,
}

impl IntoResponse for LoginResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, [(SET_COOKIE, self.cookie)], Json(self.auth_response)).into_response()
    }
}

/// Logout response: 200 with an expired cookie that clears the session
pub struct LogoutResponse {
    pub auth_response: AuthSuccessResponse,
    pub cookie: String,
}

impl IntoResponse for LogoutResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, [(SET_COOKIE, self.cookie)], Json(self.auth_response)).into_response()
    }
}

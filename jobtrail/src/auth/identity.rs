//! Request identity extraction.
//!
//! `CurrentUser` is an axum extractor: any handler that takes it as an argument
//! is authenticated, and handlers that omit it cannot see a caller identity at
//! all. Extraction is purely stateless - the token is decoded and validated
//! against the configured secret without touching the database.

use crate::{
    AppState,
    auth::session,
    errors::{Error, Result},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, instrument, trace};

/// The authenticated caller, carried by value into handlers.
///
/// The email is the canonical owner key for every scoped query.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub email: String,
}

/// Extract a session token from the cookie header if present.
/// Returns:
/// - None: No session cookie present
/// - Some(Ok(token)): Session cookie found
/// - Some(Err(error)): Cookie header present but not valid UTF-8
fn session_cookie_token(parts: &Parts, cookie_name: &str) -> Option<Result<String>> {
    let cookie_header = parts.headers.get(axum::http::header::COOKIE)?;

    let cookie_str = match cookie_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid cookie header: {e}"),
            }));
        }
    };

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some((name, value)) = cookie.split_once('=') {
            if name == cookie_name {
                return Some(Ok(value.to_string()));
            }
        }
    }
    None
}

/// Extract a session token from an `Authorization: Bearer` header if present.
fn bearer_token(parts: &Parts) -> Option<Result<String>> {
    let auth_header = parts.headers.get(axum::http::header::AUTHORIZATION)?;

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid authorization header: {e}"),
            }));
        }
    };

    // Not a Bearer scheme: treat as absent rather than invalid
    let token = auth_str.strip_prefix("Bearer ")?;
    Some(Ok(token.to_string()))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        // Cookie takes precedence over the Authorization header. Both carry the
        // same JWT, so a request with both valid means the same identity either
        // way; with a stale cookie and a fresh Bearer token the Bearer wins only
        // when the cookie is absent, matching browser-first clients.
        let cookie_name = &state.config.auth.session.cookie_name;
        let token = match session_cookie_token(parts, cookie_name) {
            Some(result) => result?,
            None => match bearer_token(parts) {
                Some(result) => result?,
                None => {
                    trace!("No authentication credentials found in request");
                    return Err(Error::Unauthenticated { message: None });
                }
            },
        };

        let secret_key = state.config.secret_key.as_ref().ok_or_else(|| Error::Internal {
            operation: "JWT sessions: secret_key is required".to_string(),
        })?;

        match session::decode_session_token(&token, secret_key) {
            Ok(claims) => {
                debug!("Authenticated session for {}", claims.sub);
                Ok(CurrentUser { email: claims.sub })
            }
            Err(e) => {
                // Expired vs forged vs garbage is logged but never surfaced:
                // every decode failure is the same 401 to the client.
                debug!("Session token rejected: {}", e);
                Err(Error::Unauthenticated { message: None })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::session::create_session_token, test_utils::create_test_config};
    use axum::extract::FromRequestParts as _;
    use sqlx::postgres::PgPool;

    fn test_state() -> AppState {
        // connect_lazy performs no IO, so these tests run without a database
        let pool = PgPool::connect_lazy("postgres://localhost:5432/unused").unwrap();
        AppState::builder().db(pool).config(create_test_config()).build()
    }

    fn parts_with_header(header_name: &str, header_value: &str) -> Parts {
        let request = axum::http::Request::builder()
            .uri("http://localhost/test")
            .header(header_name, header_value)
            .body(())
            .unwrap();

        let (parts, _body) = request.into_parts();
        parts
    }

    #[tokio::test]
    async fn test_extract_from_session_cookie() {
        let state = test_state();
        let token = create_session_token("alice@example.com", &state.config).unwrap();
        let cookie_name = &state.config.auth.session.cookie_name;

        let mut parts = parts_with_header("cookie", &format!("{cookie_name}={token}"));
        let user = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_extract_from_bearer_header() {
        let state = test_state();
        let token = create_session_token("bob@example.com", &state.config).unwrap();

        let mut parts = parts_with_header("authorization", &format!("Bearer {token}"));
        let user = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.email, "bob@example.com");
    }

    #[tokio::test]
    async fn test_cookie_among_other_cookies() {
        let state = test_state();
        let token = create_session_token("carol@example.com", &state.config).unwrap();
        let cookie_name = &state.config.auth.session.cookie_name;

        let mut parts = parts_with_header("cookie", &format!("theme=dark; {cookie_name}={token}; lang=en"));
        let user = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.email, "carol@example.com");
    }

    #[tokio::test]
    async fn test_missing_credentials_returns_401() {
        let state = test_state();
        let request = axum::http::Request::builder().uri("http://localhost/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let error = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(error.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_returns_401() {
        let state = test_state();

        let mut parts = parts_with_header("authorization", "Bearer not.a.valid.token");
        let error = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(error.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_secret_returns_401() {
        let state = test_state();
        let mut other_config = create_test_config();
        other_config.secret_key = Some("some-other-secret".to_string());
        let token = create_session_token("mallory@example.com", &other_config).unwrap();

        let mut parts = parts_with_header("authorization", &format!("Bearer {token}"));
        let error = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(error.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_ignored() {
        let state = test_state();

        let mut parts = parts_with_header("authorization", "Basic dXNlcjpwYXNz");
        let error = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(error.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }
}

use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::{
        auth::{AuthResponse, AuthSuccessResponse, LoginRequest, LoginResponse, LogoutResponse, RegisterRequest, RegisterResponse},
        users::UserResponse,
    },
    auth::{password, session},
    db::{handlers::Users, models::users::UserCreateDBRequest},
    errors::Error,
    types::abbrev_uuid,
};
use sqlx::Acquire;
use tracing::info;

/// Register a new user account
#[utoipa::path(
    post,
    path = "/authentication/register",
    request_body = RegisterRequest,
    tag = "authentication",
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Invalid input or email already registered"),
        (status = 409, description = "Concurrent registration with the same email"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(State(state): State<AppState>, Json(request): Json<RegisterRequest>) -> Result<RegisterResponse, Error> {
    if !state.config.auth.allow_registration {
        return Err(Error::BadRequest {
            message: "User registration is disabled".to_string(),
        });
    }

    // Validate password length
    let password_config = &state.config.auth.password;
    if request.password.len() < password_config.min_length {
        return Err(Error::BadRequest {
            message: format!("Password must be at least {} characters", password_config.min_length),
        });
    }
    if request.password.len() > password_config.max_length {
        return Err(Error::BadRequest {
            message: format!("Password must be no more than {} characters", password_config.max_length),
        });
    }

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    // Friendly 400 for the common case. Two concurrent registrations can both
    // pass this check; the unique constraint on email turns the loser into 409.
    {
        let mut user_repo = Users::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        if user_repo.get_by_email(&request.email).await?.is_some() {
            return Err(Error::BadRequest {
                message: "An account with this email address already exists".to_string(),
            });
        }
    }

    // Hash the password on a blocking thread to avoid blocking async runtime
    let password = request.password.clone();
    let params = password::Argon2Params {
        memory_kib: password_config.argon2_memory_kib,
        iterations: password_config.argon2_iterations,
        parallelism: password_config.argon2_parallelism,
    };
    let password_hash = tokio::task::spawn_blocking(move || password::hash_string_with_params(&password, Some(params)))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })??;

    let create_request = UserCreateDBRequest {
        username: request.username,
        email: request.email,
        password_hash,
    };

    let created_user = {
        let mut user_repo = Users::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        user_repo.create(&create_request).await?
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;
    info!(user_id = %abbrev_uuid(&created_user.id), email = %created_user.email, "Registered new user");
    let user_response = UserResponse::from(created_user);

    // Create session token
    let token = session::create_session_token(&user_response.email, &state.config)?;
    let cookie = create_session_cookie(&token, &state.config);

    let auth_response = AuthResponse {
        user: user_response,
        message: "Registration successful".to_string(),
        access_token: token,
        token_type: "bearer".to_string(),
    };

    Ok(RegisterResponse { auth_response, cookie })
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/authentication/login",
    request_body = LoginRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<LoginResponse, Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut pool_conn);

    // Unknown email and wrong password produce the same response, so login
    // outcomes never reveal which emails are registered
    let user = user_repo
        .get_by_email(&request.email)
        .await?
        .ok_or_else(|| Error::Unauthenticated {
            message: Some("Invalid email or password".to_string()),
        })?;

    // Verify password on a blocking thread to avoid blocking async runtime
    let password = request.password.clone();
    let hash = user.password_hash.clone();
    let is_valid = tokio::task::spawn_blocking(move || password::verify_string(&password, &hash))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })?;

    if !is_valid {
        return Err(Error::Unauthenticated {
            message: Some("Invalid email or password".to_string()),
        });
    }

    let user_response = UserResponse::from(user);

    // Create session token
    let token = session::create_session_token(&user_response.email, &state.config)?;
    let cookie = create_session_cookie(&token, &state.config);

    let auth_response = AuthResponse {
        user: user_response,
        message: "Login successful".to_string(),
        access_token: token,
        token_type: "bearer".to_string(),
    };

    Ok(LoginResponse { auth_response, cookie })
}

/// Logout (clear session cookie)
///
/// Tokens are not tracked server-side, so logout only clears the browser
/// cookie. A token a client has kept hold of stays valid until it expires.
#[utoipa::path(
    post,
    path = "/authentication/logout",
    tag = "authentication",
    responses(
        (status = 200, description = "Logout successful", body = AuthSuccessResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> Result<LogoutResponse, Error> {
    // Create expired cookie to clear session
    let cookie = format!(
        "{}=; Path=/; HttpOnly; Secure; SameSite=Strict; Max-Age=0",
        state.config.auth.session.cookie_name
    );

    let auth_response = AuthSuccessResponse {
        message: "Logout successful".to_string(),
    };

    Ok(LogoutResponse { auth_response, cookie })
}

/// Helper function to create a session cookie
fn create_session_cookie(token: &str, config: &crate::config::Config) -> String {
    let session_config = &config.auth.session;
    let max_age = config.auth.security.jwt_expiry.as_secs();

    format!(
        "{}={}; Path=/; HttpOnly; Secure={}; SameSite={}; Max-Age={}",
        session_config.cookie_name, token, session_config.cookie_secure, session_config.cookie_same_site, max_age
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_config;
    use axum_test::TestServer;
    use sqlx::PgPool;

    fn auth_router(state: AppState) -> axum::Router {
        axum::Router::new()
            .route("/authentication/register", axum::routing::post(register))
            .route("/authentication/login", axum::routing::post(login))
            .route("/authentication/logout", axum::routing::post(logout))
            .with_state(state)
    }

    fn state_with(pool: PgPool, config: crate::config::Config) -> AppState {
        AppState::builder().db(pool).config(config).build()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_register_success(pool: PgPool) {
        let state = state_with(pool, create_test_config());
        let server = TestServer::new(auth_router(state)).unwrap();

        let request = RegisterRequest {
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };

        let response = server.post("/authentication/register").json(&request).await;

        response.assert_status(axum::http::StatusCode::CREATED);
        assert!(response.headers().get("set-cookie").is_some());

        let body: AuthResponse = response.json();
        assert_eq!(body.user.email, "test@example.com");
        assert_eq!(body.message, "Registration successful");
        assert_eq!(body.token_type, "bearer");
        assert!(!body.access_token.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_register_duplicate_email(pool: PgPool) {
        let state = state_with(pool, create_test_config());
        let server = TestServer::new(auth_router(state)).unwrap();

        let request = RegisterRequest {
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };

        server.post("/authentication/register").json(&request).await.assert_status(axum::http::StatusCode::CREATED);

        let response = server.post("/authentication/register").json(&request).await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_register_disabled(pool: PgPool) {
        let mut config = create_test_config();
        config.auth.allow_registration = false;
        let state = state_with(pool, config);
        let server = TestServer::new(auth_router(state)).unwrap();

        let request = RegisterRequest {
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };

        let response = server.post("/authentication/register").json(&request).await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_password_validation(pool: PgPool) {
        let mut config = create_test_config();
        config.auth.password.min_length = 10;
        let state = state_with(pool, config);
        let server = TestServer::new(auth_router(state)).unwrap();

        let request = RegisterRequest {
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password: "short".to_string(), // Too short
        };

        let response = server.post("/authentication/register").json(&request).await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_login_success(pool: PgPool) {
        let state = state_with(pool, create_test_config());
        let server = TestServer::new(auth_router(state)).unwrap();

        let register = RegisterRequest {
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        server.post("/authentication/register").json(&register).await.assert_status(axum::http::StatusCode::CREATED);

        let login_request = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        let response = server.post("/authentication/login").json(&login_request).await;

        response.assert_status_ok();
        assert!(response.headers().get("set-cookie").is_some());

        let body: AuthResponse = response.json();
        assert_eq!(body.user.email, "test@example.com");
        assert!(!body.access_token.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_login_failures_are_indistinguishable(pool: PgPool) {
        let state = state_with(pool, create_test_config());
        let server = TestServer::new(auth_router(state)).unwrap();

        let register = RegisterRequest {
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        server.post("/authentication/register").json(&register).await.assert_status(axum::http::StatusCode::CREATED);

        // Wrong password for a known email
        let wrong_password = server
            .post("/authentication/login")
            .json(&LoginRequest {
                email: "test@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;
        wrong_password.assert_status(axum::http::StatusCode::UNAUTHORIZED);

        // Unknown email entirely
        let unknown_email = server
            .post("/authentication/login")
            .json(&LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await;
        unknown_email.assert_status(axum::http::StatusCode::UNAUTHORIZED);

        // Same status and same body: no email enumeration through login
        assert_eq!(wrong_password.text(), unknown_email.text());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_logout_clears_cookie(pool: PgPool) {
        let state = state_with(pool, create_test_config());
        let server = TestServer::new(auth_router(state)).unwrap();

        let response = server.post("/authentication/logout").await;
        response.assert_status_ok();

        let cookie = response.headers().get("set-cookie").unwrap().to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }
}

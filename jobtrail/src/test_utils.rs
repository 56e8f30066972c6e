//! Shared test helpers for repository and handler tests.

use crate::config::{AuthConfig, Config, CorsConfig, SecurityConfig};
use crate::db::handlers::Users;
use crate::db::models::{
    applications::ApplicationCreateDBRequest, contacts::ContactCreateDBRequest, users::UserCreateDBRequest, users::UserDBResponse,
};
use chrono::NaiveDate;
use sqlx::PgPool;
use std::time::Duration;

/// Build a config suitable for tests: fixed secret, short-ish session expiry,
/// everything else at defaults.
pub fn create_test_config() -> Config {
    Config {
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        auth: AuthConfig {
            security: SecurityConfig {
                jwt_expiry: Duration::from_secs(3600),
                cors: CorsConfig::default(),
            },
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Insert a user row directly, bypassing the registration endpoint.
///
/// The password hash is a placeholder. Tests that exercise login go through
/// the registration handler instead so the hash is real.
pub async fn create_test_user(pool: &PgPool, email: &str) -> UserDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut users = Users::new(&mut conn);

    let username = email.split('@').next().unwrap_or(email).to_string();
    users
        .create(&UserCreateDBRequest {
            username,
            email: email.to_string(),
            password_hash: "$argon2id$unused-test-hash".to_string(),
        })
        .await
        .expect("Failed to create test user")
}

/// A minimal application create request. Callers override fields as needed.
pub fn sample_application(company: &str, status: &str) -> ApplicationCreateDBRequest {
    ApplicationCreateDBRequest {
        company: company.to_string(),
        position: "Software Engineer".to_string(),
        status: status.to_string(),
        date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        priority: "medium".to_string(),
        matched_skills: vec!["rust".to_string()],
        required_skills: vec!["rust".to_string(), "sql".to_string()],
    }
}

/// A minimal contact create request.
pub fn sample_contact(name: &str, company: &str) -> ContactCreateDBRequest {
    ContactCreateDBRequest {
        name: name.to_string(),
        role: "Engineering Manager".to_string(),
        company: company.to_string(),
        linkedin: format!("https://linkedin.com/in/{}", name.to_lowercase().replace(' ', "-")),
        email: None,
        phone: None,
    }
}

//! # jobtrail: Job Application Tracking Service
//!
//! `jobtrail` is a small HTTP service for tracking a job search. Authenticated
//! users record the applications they have submitted, keep a status timeline
//! per application, and maintain a list of networking contacts.
//!
//! ## Overview
//!
//! Every record belongs to exactly one user. The service authenticates users
//! with email and password, hands out a signed session token (a JWT, delivered
//! both as an HttpOnly cookie and as a bearer token in the response body), and
//! scopes every database query to the authenticated user's email. A row that
//! belongs to someone else is indistinguishable from a row that does not
//! exist: both produce a 404.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses PostgreSQL for persistence.
//!
//! The **API layer** ([`api`]) exposes authentication routes at
//! `/authentication/*` and the resource API at `/api/v1/*`. Handlers receive
//! the authenticated identity through the [`auth::identity::CurrentUser`]
//! extractor and never read credentials themselves.
//!
//! The **authentication layer** ([`auth`]) covers password hashing (Argon2id),
//! session token issue and verification (HS256 JWTs), and the request
//! extractor that turns a cookie or bearer token into a [`auth::identity::CurrentUser`].
//!
//! The **database layer** ([`db`]) uses the repository pattern. Owned
//! resources (applications, contacts) implement
//! [`db::handlers::OwnedRepository`], whose every method takes the owner's
//! email and folds it into the SQL predicate. Timeline entries are scoped
//! through their parent application instead.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use jobtrail::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = jobtrail::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     jobtrail::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! The application requires a PostgreSQL database and automatically runs
//! migrations on startup:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
//! jobtrail::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
mod types;

#[cfg(test)]
pub mod test_utils;

use crate::config::CorsOrigin;
use crate::openapi::ApiDoc;
use axum::http::HeaderValue;
use axum::{
    http,
    routing::{delete, get, patch, post},
    Router,
};
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, instrument, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{ApplicationId, ContactId, TimelineEntryId, UserId};

/// Application state shared across all request handlers.
///
/// Contains the PostgreSQL connection pool and the loaded configuration.
/// Cloning is cheap: the pool is reference counted internally.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the jobtrail database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.auth.security.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>()?,
            CorsOrigin::Url(url) => url.as_str().parse::<HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.auth.security.cors.allow_credentials)
        .expose_headers(vec![http::header::LOCATION]);

    if let Some(max_age) = config.auth.security.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the main application router with all endpoints and middleware.
///
/// This function constructs the complete Axum router with:
/// - Authentication routes (register, login, logout)
/// - Resource routes under `/api/v1` (applications, timelines, contacts)
/// - API documentation at `/docs`
/// - CORS configuration
/// - Tracing middleware
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    // Authentication routes (at root level, outside the versioned API)
    let auth_routes = Router::new()
        .route("/authentication/register", post(api::handlers::auth::register))
        .route("/authentication/login", post(api::handlers::auth::login))
        .route("/authentication/logout", post(api::handlers::auth::logout))
        .with_state(state.clone());

    // Resource routes, all behind the CurrentUser extractor
    let api_routes = Router::new()
        // Job applications
        .route("/applications", get(api::handlers::applications::list_applications))
        .route("/applications", post(api::handlers::applications::create_application))
        .route("/applications/status-summary", get(api::handlers::applications::status_summary))
        .route("/applications/{application_id}", get(api::handlers::applications::get_application))
        .route("/applications/{application_id}", patch(api::handlers::applications::update_application))
        .route("/applications/{application_id}", delete(api::handlers::applications::delete_application))
        // Status timeline as an application sub-resource
        .route(
            "/applications/{application_id}/timeline",
            get(api::handlers::timelines::list_timeline),
        )
        .route(
            "/applications/{application_id}/timeline",
            post(api::handlers::timelines::create_timeline_entry),
        )
        .route(
            "/applications/{application_id}/timeline/latest",
            get(api::handlers::timelines::latest_timeline_entry),
        )
        .route(
            "/applications/{application_id}/timeline/{entry_id}",
            patch(api::handlers::timelines::update_timeline_entry),
        )
        .route(
            "/applications/{application_id}/timeline/{entry_id}",
            delete(api::handlers::timelines::delete_timeline_entry),
        )
        // Networking contacts
        .route("/contacts", get(api::handlers::contacts::list_contacts))
        .route("/contacts", post(api::handlers::contacts::create_contact))
        .route("/contacts/{contact_id}", get(api::handlers::contacts::get_contact))
        .route("/contacts/{contact_id}", patch(api::handlers::contacts::update_contact))
        .route("/contacts/{contact_id}", delete(api::handlers::contacts::delete_contact))
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(auth_routes)
        .nest("/api/v1", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let cors_layer = create_cors_layer(&state.config)?;

    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] connects to the database, runs
///    migrations, and builds the router
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts
///    handling requests
/// 3. **Shutdown**: when the shutdown future resolves, in-flight requests
///    drain and the pool is closed
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting jobtrail with configuration: {:#?}", config);

        let pool = PgPool::connect(&config.database_url).await?;
        migrator().run(&pool).await?;

        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "jobtrail listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{build_router, AppState};
    use crate::api::models::{applications::ApplicationResponse, auth::AuthResponse};
    use axum_test::TestServer;
    use serde_json::json;
    use sqlx::PgPool;

    fn test_server(pool: PgPool) -> TestServer {
        let state = AppState::builder()
            .db(pool)
            .config(crate::test_utils::create_test_config())
            .build();
        TestServer::new(build_router(state).unwrap()).unwrap()
    }

    async fn register_and_login(server: &TestServer, username: &str, email: &str) -> String {
        let response = server
            .post("/authentication/register")
            .json(&json!({"username": username, "email": email, "password": "correct horse battery"}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let response = server
            .post("/authentication/login")
            .json(&json!({"email": email, "password": "correct horse battery"}))
            .await;
        response.assert_status_ok();
        let body: AuthResponse = response.json();
        body.access_token
    }

    #[sqlx::test(migrations = "./migrations")]
    #[test_log::test]
    async fn test_end_to_end_ownership_flow(pool: PgPool) {
        let server = test_server(pool);

        // Wrong password is rejected before any token exists
        server
            .post("/authentication/register")
            .json(&json!({"username": "alice", "email": "alice@example.com", "password": "correct horse battery"}))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
        server
            .post("/authentication/login")
            .json(&json!({"email": "alice@example.com", "password": "wrong password"}))
            .await
            .assert_status(axum::http::StatusCode::UNAUTHORIZED);

        let response = server
            .post("/authentication/login")
            .json(&json!({"email": "alice@example.com", "password": "correct horse battery"}))
            .await;
        response.assert_status_ok();
        let alice_token = response.json::<AuthResponse>().access_token;

        // Alice records an application
        let response = server
            .post("/api/v1/applications")
            .authorization_bearer(&alice_token)
            .json(&json!({
                "company": "Acme",
                "position": "Software Engineer",
                "status": "applied",
                "date": "2026-02-01",
                "priority": "high"
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let created: ApplicationResponse = response.json();
        assert_eq!(created.company, "Acme");

        // Alice can read it back
        server
            .get(&format!("/api/v1/applications/{}", created.id))
            .authorization_bearer(&alice_token)
            .await
            .assert_status_ok();

        // Bob cannot see it, and gets the same 404 as for a missing row
        let bob_token = register_and_login(&server, "bob", "bob@example.com").await;
        server
            .get(&format!("/api/v1/applications/{}", created.id))
            .authorization_bearer(&bob_token)
            .await
            .assert_status_not_found();
        server
            .get("/api/v1/applications/999999")
            .authorization_bearer(&bob_token)
            .await
            .assert_status_not_found();

        // Unauthenticated access is rejected outright
        server
            .get("/api/v1/applications")
            .await
            .assert_status(axum::http::StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[test_log::test]
    async fn test_timeline_scoped_through_parent(pool: PgPool) {
        let server = test_server(pool);
        let alice_token = register_and_login(&server, "alice", "alice@example.com").await;
        let bob_token = register_and_login(&server, "bob", "bob@example.com").await;

        let response = server
            .post("/api/v1/applications")
            .authorization_bearer(&alice_token)
            .json(&json!({
                "company": "Globex",
                "position": "Backend Engineer",
                "status": "applied",
                "date": "2026-03-01",
                "priority": "medium"
            }))
            .await;
        let app: ApplicationResponse = response.json();

        server
            .post(&format!("/api/v1/applications/{}/timeline", app.id))
            .authorization_bearer(&alice_token)
            .json(&json!({"status": "interview", "notes": "phone screen booked"}))
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        server
            .get(&format!("/api/v1/applications/{}/timeline/latest", app.id))
            .authorization_bearer(&alice_token)
            .await
            .assert_status_ok();

        // Bob cannot list or append to Alice's timeline
        server
            .get(&format!("/api/v1/applications/{}/timeline", app.id))
            .authorization_bearer(&bob_token)
            .await
            .assert_status_not_found();
        server
            .post(&format!("/api/v1/applications/{}/timeline", app.id))
            .authorization_bearer(&bob_token)
            .json(&json!({"status": "offer"}))
            .await
            .assert_status_not_found();
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_healthz(pool: PgPool) {
        let server = test_server(pool);
        let response = server.get("/healthz").await;
        response.assert_status_ok();
        response.assert_text("OK");
    }
}

//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Authentication** (`/authentication/*`): Registration, login, logout
//! - **Applications** (`/api/v1/applications/*`): Job application tracking,
//!   including the per-application status timeline
//! - **Contacts** (`/api/v1/contacts/*`): Networking contacts
//!
//! Everything under `/api/v1` requires an authenticated session and operates
//! only on the caller's own data.
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`.
//! API documentation is served at `/docs` when the server is running.

pub mod handlers;
pub mod models;

//! Axum route handlers for all API endpoints.

pub mod applications;
pub mod auth;
pub mod contacts;
pub mod timelines;

//! Database models for job applications.

use crate::types::ApplicationId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Request to create a job application.
///
/// The owner is never part of the request: repositories take it as a separate
/// argument so it always comes from the authenticated identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationCreateDBRequest {
    pub company: String,
    pub position: String,
    pub status: String,
    pub date: NaiveDate,
    pub priority: String,
    pub matched_skills: Vec<String>,
    pub required_skills: Vec<String>,
}

/// Request to update a job application. None fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApplicationUpdateDBRequest {
    pub company: Option<String>,
    pub position: Option<String>,
    pub status: Option<String>,
    pub date: Option<NaiveDate>,
    pub priority: Option<String>,
    pub matched_skills: Option<Vec<String>>,
    pub required_skills: Option<Vec<String>>,
}

/// Job application as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationDBResponse {
    pub id: ApplicationId,
    pub user_email: String,
    pub company: String,
    pub position: String,
    pub status: String,
    pub date: NaiveDate,
    pub priority: String,
    pub matched_skills: Vec<String>,
    pub required_skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// One row of the per-status application counts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StatusCountDBResponse {
    pub status: String,
    pub count: i64,
}

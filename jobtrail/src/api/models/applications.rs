//! API models for job applications.

use crate::{
    db::models::applications::{
        ApplicationCreateDBRequest, ApplicationDBResponse, ApplicationUpdateDBRequest, StatusCountDBResponse,
    },
    types::ApplicationId,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Request to create a job application
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationCreateRequest {
    pub company: String,
    pub position: String,
    pub status: String,
    pub date: NaiveDate,
    pub priority: String,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

impl From<ApplicationCreateRequest> for ApplicationCreateDBRequest {
    fn from(request: ApplicationCreateRequest) -> Self {
        Self {
            company: request.company,
            position: request.position,
            status: request.status,
            date: request.date,
            priority: request.priority,
            matched_skills: request.matched_skills,
            required_skills: request.required_skills,
        }
    }
}

/// Partial update for a job application. Omitted fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default, ToSchema)]
pub struct ApplicationUpdateRequest {
    pub company: Option<String>,
    pub position: Option<String>,
    pub status: Option<String>,
    pub date: Option<NaiveDate>,
    pub priority: Option<String>,
    pub matched_skills: Option<Vec<String>>,
    pub required_skills: Option<Vec<String>>,
}

impl From<ApplicationUpdateRequest> for ApplicationUpdateDBRequest {
    fn from(request: ApplicationUpdateRequest) -> Self {
        Self {
            company: request.company,
            position: request.position,
            status: request.status,
            date: request.date,
            priority: request.priority,
            matched_skills: request.matched_skills,
            required_skills: request.required_skills,
        }
    }
}

/// Query parameters for listing applications
#[derive(Debug, Clone, Deserialize, Default, IntoParams)]
pub struct ApplicationListParams {
    /// Restrict to a single status (e.g. "applied", "interview")
    pub status: Option<String>,
}

/// Job application as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationResponse {
    pub id: ApplicationId,
    pub company: String,
    pub position: String,
    pub status: String,
    pub date: NaiveDate,
    pub priority: String,
    pub matched_skills: Vec<String>,
    pub required_skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ApplicationDBResponse> for ApplicationResponse {
    fn from(application: ApplicationDBResponse) -> Self {
        Self {
            id: application.id,
            company: application.company,
            position: application.position,
            status: application.status,
            date: application.date,
            priority: application.priority,
            matched_skills: application.matched_skills,
            required_skills: application.required_skills,
            created_at: application.created_at,
        }
    }
}

/// One row of the per-status application counts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusCountResponse {
    pub status: String,
    pub count: i64,
}

impl From<StatusCountDBResponse> for StatusCountResponse {
    fn from(row: StatusCountDBResponse) -> Self {
        Self {
            status: row.status,
            count: row.count,
        }
    }
}

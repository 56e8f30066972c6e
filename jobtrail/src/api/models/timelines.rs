//! API models for application timeline entries.

use crate::{
    db::models::timelines::{TimelineEntryCreateDBRequest, TimelineEntryDBResponse, TimelineEntryUpdateDBRequest},
    types::{ApplicationId, TimelineEntryId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to append a timeline entry. The timestamp defaults to now.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimelineEntryCreateRequest {
    pub status: String,
    pub date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl From<TimelineEntryCreateRequest> for TimelineEntryCreateDBRequest {
    fn from(request: TimelineEntryCreateRequest) -> Self {
        Self {
            status: request.status,
            date: request.date,
            notes: request.notes,
        }
    }
}

/// Partial update for a timeline entry. Omitted fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default, ToSchema)]
pub struct TimelineEntryUpdateRequest {
    pub status: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl From<TimelineEntryUpdateRequest> for TimelineEntryUpdateDBRequest {
    fn from(request: TimelineEntryUpdateRequest) -> Self {
        Self {
            status: request.status,
            date: request.date,
            notes: request.notes,
        }
    }
}

/// Timeline entry as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimelineEntryResponse {
    pub id: TimelineEntryId,
    pub application_id: ApplicationId,
    pub status: String,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
}

impl From<TimelineEntryDBResponse> for TimelineEntryResponse {
    fn from(entry: TimelineEntryDBResponse) -> Self {
        Self {
            id: entry.id,
            application_id: entry.application_id,
            status: entry.status,
            date: entry.date,
            notes: entry.notes,
        }
    }
}

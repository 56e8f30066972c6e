//! Database models for application timeline entries.

use crate::types::{ApplicationId, TimelineEntryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Request to create a timeline entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntryCreateDBRequest {
    pub status: String,
    pub date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Request to update a timeline entry. None fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TimelineEntryUpdateDBRequest {
    pub status: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Timeline entry as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TimelineEntryDBResponse {
    pub id: TimelineEntryId,
    pub application_id: ApplicationId,
    pub status: String,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
}

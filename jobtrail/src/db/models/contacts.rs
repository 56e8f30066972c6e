//! Database models for networking contacts.

use crate::types::ContactId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Request to create a networking contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactCreateDBRequest {
    pub name: String,
    pub role: String,
    pub company: String,
    pub linkedin: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Request to update a networking contact. None fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContactUpdateDBRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub linkedin: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Networking contact as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactDBResponse {
    pub id: ContactId,
    pub user_email: String,
    pub name: String,
    pub role: String,
    pub company: String,
    pub linkedin: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

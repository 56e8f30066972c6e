//! API models for networking contacts.

use crate::{
    db::models::contacts::{ContactCreateDBRequest, ContactDBResponse, ContactUpdateDBRequest},
    types::ContactId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Request to create a networking contact
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactCreateRequest {
    pub name: String,
    pub role: String,
    pub company: String,
    pub linkedin: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<ContactCreateRequest> for ContactCreateDBRequest {
    fn from(request: ContactCreateRequest) -> Self {
        Self {
            name: request.name,
            role: request.role,
            company: request.company,
            linkedin: request.linkedin,
            email: request.email,
            phone: request.phone,
        }
    }
}

/// Partial update for a networking contact. Omitted fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default, ToSchema)]
pub struct ContactUpdateRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub linkedin: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<ContactUpdateRequest> for ContactUpdateDBRequest {
    fn from(request: ContactUpdateRequest) -> Self {
        Self {
            name: request.name,
            role: request.role,
            company: request.company,
            linkedin: request.linkedin,
            email: request.email,
            phone: request.phone,
        }
    }
}

/// Query parameters for listing contacts
#[derive(Debug, Clone, Deserialize, Default, IntoParams)]
pub struct ContactListParams {
    /// Restrict to contacts at a single company
    pub company: Option<String>,
}

/// Networking contact as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    pub id: ContactId,
    pub name: String,
    pub role: String,
    pub company: String,
    pub linkedin: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ContactDBResponse> for ContactResponse {
    fn from(contact: ContactDBResponse) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            role: contact.role,
            company: contact.company,
            linkedin: contact.linkedin,
            email: contact.email,
            phone: contact.phone,
            created_at: contact.created_at,
        }
    }
}

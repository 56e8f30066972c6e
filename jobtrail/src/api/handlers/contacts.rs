//! Handlers for networking contact endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        contacts::{ContactCreateRequest, ContactListParams, ContactResponse, ContactUpdateRequest},
        pagination::Pagination,
    },
    auth::identity::CurrentUser,
    db::handlers::{Contacts, OwnedRepository, contacts::ContactFilter},
    errors::Error,
    types::ContactId,
};

/// List the current user's networking contacts
#[utoipa::path(
    get,
    path = "/api/v1/contacts",
    tag = "contacts",
    params(ContactListParams, Pagination),
    responses(
        (status = 200, description = "List of contacts", body = Vec<ContactResponse>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email))]
pub async fn list_contacts(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(params): Query<ContactListParams>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<ContactResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Contacts::new(&mut conn);

    let (skip, limit) = pagination.params();
    let filter = ContactFilter {
        company: params.company,
        skip,
        limit,
    };
    let contacts = repo.list(&current_user.email, &filter).await?;

    Ok(Json(contacts.into_iter().map(ContactResponse::from).collect()))
}

/// Create a networking contact
#[utoipa::path(
    post,
    path = "/api/v1/contacts",
    request_body = ContactCreateRequest,
    tag = "contacts",
    responses(
        (status = 201, description = "Contact created", body = ContactResponse),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email))]
pub async fn create_contact(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<ContactCreateRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Contacts::new(&mut conn);

    let created = repo.create(&current_user.email, &request.into()).await?;

    Ok((StatusCode::CREATED, Json(ContactResponse::from(created))))
}

/// Get a single networking contact
#[utoipa::path(
    get,
    path = "/api/v1/contacts/{contact_id}",
    tag = "contacts",
    params(("contact_id" = i64, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "The contact", body = ContactResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Contact not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email, contact_id))]
pub async fn get_contact(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(contact_id): Path<ContactId>,
) -> Result<Json<ContactResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Contacts::new(&mut conn);

    let contact = repo
        .get_by_id(&current_user.email, contact_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Contact".to_string(),
            id: contact_id.to_string(),
        })?;

    Ok(Json(ContactResponse::from(contact)))
}

/// Update a networking contact (partial)
#[utoipa::path(
    patch,
    path = "/api/v1/contacts/{contact_id}",
    request_body = ContactUpdateRequest,
    tag = "contacts",
    params(("contact_id" = i64, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "Updated contact", body = ContactResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Contact not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email, contact_id))]
pub async fn update_contact(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(contact_id): Path<ContactId>,
    Json(request): Json<ContactUpdateRequest>,
) -> Result<Json<ContactResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Contacts::new(&mut conn);

    let updated = repo
        .update(&current_user.email, contact_id, &request.into())
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Contact".to_string(),
            id: contact_id.to_string(),
        })?;

    Ok(Json(ContactResponse::from(updated)))
}

/// Delete a networking contact
#[utoipa::path(
    delete,
    path = "/api/v1/contacts/{contact_id}",
    tag = "contacts",
    params(("contact_id" = i64, Path, description = "Contact ID")),
    responses(
        (status = 204, description = "Contact deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Contact not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email, contact_id))]
pub async fn delete_contact(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(contact_id): Path<ContactId>,
) -> Result<StatusCode, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Contacts::new(&mut conn);

    let deleted = repo.delete(&current_user.email, contact_id).await?;
    if !deleted {
        return Err(Error::NotFound {
            resource: "Contact".to_string(),
            id: contact_id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for application timeline endpoints.
//!
//! Timeline routes are nested under an application. The parent ownership check
//! lives in the repository queries; handlers only translate "not owned" into
//! the same 404 a missing application would get.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::timelines::{TimelineEntryCreateRequest, TimelineEntryResponse, TimelineEntryUpdateRequest},
    auth::identity::CurrentUser,
    db::handlers::Timelines,
    errors::Error,
    types::{ApplicationId, TimelineEntryId},
};

fn application_not_found(application_id: ApplicationId) -> Error {
    Error::NotFound {
        resource: "Application".to_string(),
        id: application_id.to_string(),
    }
}

/// List an application's timeline, oldest entry first
#[utoipa::path(
    get,
    path = "/api/v1/applications/{application_id}/timeline",
    tag = "timeline",
    params(("application_id" = i64, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Timeline entries", body = Vec<TimelineEntryResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Application not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email, application_id))]
pub async fn list_timeline(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(application_id): Path<ApplicationId>,
) -> Result<Json<Vec<TimelineEntryResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Timelines::new(&mut conn);

    if !repo.parent_owned(&current_user.email, application_id).await? {
        return Err(application_not_found(application_id));
    }

    let entries = repo.list(&current_user.email, application_id).await?;

    Ok(Json(entries.into_iter().map(TimelineEntryResponse::from).collect()))
}

/// Append an entry to an application's timeline
#[utoipa::path(
    post,
    path = "/api/v1/applications/{application_id}/timeline",
    request_body = TimelineEntryCreateRequest,
    tag = "timeline",
    params(("application_id" = i64, Path, description = "Application ID")),
    responses(
        (status = 201, description = "Entry created", body = TimelineEntryResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Application not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email, application_id))]
pub async fn create_timeline_entry(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(application_id): Path<ApplicationId>,
    Json(request): Json<TimelineEntryCreateRequest>,
) -> Result<(StatusCode, Json<TimelineEntryResponse>), Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Timelines::new(&mut conn);

    let created = repo
        .create(&current_user.email, application_id, &request.into())
        .await?
        .ok_or_else(|| application_not_found(application_id))?;

    Ok((StatusCode::CREATED, Json(TimelineEntryResponse::from(created))))
}

/// The most recent timeline entry for an application
#[utoipa::path(
    get,
    path = "/api/v1/applications/{application_id}/timeline/latest",
    tag = "timeline",
    params(("application_id" = i64, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Latest entry, or null for an empty timeline", body = Option<TimelineEntryResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Application not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email, application_id))]
pub async fn latest_timeline_entry(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(application_id): Path<ApplicationId>,
) -> Result<Json<Option<TimelineEntryResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Timelines::new(&mut conn);

    if !repo.parent_owned(&current_user.email, application_id).await? {
        return Err(application_not_found(application_id));
    }

    let latest = repo.latest(&current_user.email, application_id).await?;

    Ok(Json(latest.map(TimelineEntryResponse::from)))
}

/// Update a timeline entry (partial)
#[utoipa::path(
    patch,
    path = "/api/v1/applications/{application_id}/timeline/{entry_id}",
    request_body = TimelineEntryUpdateRequest,
    tag = "timeline",
    params(
        ("application_id" = i64, Path, description = "Application ID"),
        ("entry_id" = i64, Path, description = "Timeline entry ID"),
    ),
    responses(
        (status = 200, description = "Updated entry", body = TimelineEntryResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Application or entry not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email, application_id, entry_id))]
pub async fn update_timeline_entry(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path((application_id, entry_id)): Path<(ApplicationId, TimelineEntryId)>,
    Json(request): Json<TimelineEntryUpdateRequest>,
) -> Result<Json<TimelineEntryResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Timelines::new(&mut conn);

    let updated = repo
        .update(&current_user.email, application_id, entry_id, &request.into())
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Timeline entry".to_string(),
            id: entry_id.to_string(),
        })?;

    Ok(Json(TimelineEntryResponse::from(updated)))
}

/// Delete a timeline entry
#[utoipa::path(
    delete,
    path = "/api/v1/applications/{application_id}/timeline/{entry_id}",
    tag = "timeline",
    params(
        ("application_id" = i64, Path, description = "Application ID"),
        ("entry_id" = i64, Path, description = "Timeline entry ID"),
    ),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Application or entry not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email, application_id, entry_id))]
pub async fn delete_timeline_entry(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path((application_id, entry_id)): Path<(ApplicationId, TimelineEntryId)>,
) -> Result<StatusCode, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Timelines::new(&mut conn);

    let deleted = repo.delete(&current_user.email, application_id, entry_id).await?;
    if !deleted {
        return Err(Error::NotFound {
            resource: "Timeline entry".to_string(),
            id: entry_id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

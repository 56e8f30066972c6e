//! Handlers for job application endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        applications::{
            ApplicationCreateRequest, ApplicationListParams, ApplicationResponse, ApplicationUpdateRequest,
            StatusCountResponse,
        },
        pagination::Pagination,
    },
    auth::identity::CurrentUser,
    db::handlers::{Applications, OwnedRepository, applications::ApplicationFilter},
    errors::Error,
    types::ApplicationId,
};

/// List the current user's job applications
#[utoipa::path(
    get,
    path = "/api/v1/applications",
    tag = "applications",
    params(ApplicationListParams, Pagination),
    responses(
        (status = 200, description = "List of applications", body = Vec<ApplicationResponse>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email))]
pub async fn list_applications(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(params): Query<ApplicationListParams>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<ApplicationResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    let (skip, limit) = pagination.params();
    let filter = ApplicationFilter {
        status: params.status,
        skip,
        limit,
    };
    let applications = repo.list(&current_user.email, &filter).await?;

    Ok(Json(applications.into_iter().map(ApplicationResponse::from).collect()))
}

/// Create a job application
#[utoipa::path(
    post,
    path = "/api/v1/applications",
    request_body = ApplicationCreateRequest,
    tag = "applications",
    responses(
        (status = 201, description = "Application created", body = ApplicationResponse),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email))]
pub async fn create_application(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<ApplicationCreateRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    let created = repo.create(&current_user.email, &request.into()).await?;

    Ok((StatusCode::CREATED, Json(ApplicationResponse::from(created))))
}

/// Get a single job application
#[utoipa::path(
    get,
    path = "/api/v1/applications/{application_id}",
    tag = "applications",
    params(("application_id" = i64, Path, description = "Application ID")),
    responses(
        (status = 200, description = "The application", body = ApplicationResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Application not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email, application_id))]
pub async fn get_application(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(application_id): Path<ApplicationId>,
) -> Result<Json<ApplicationResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    let application = repo
        .get_by_id(&current_user.email, application_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Application".to_string(),
            id: application_id.to_string(),
        })?;

    Ok(Json(ApplicationResponse::from(application)))
}

/// Update a job application (partial)
#[utoipa::path(
    patch,
    path = "/api/v1/applications/{application_id}",
    request_body = ApplicationUpdateRequest,
    tag = "applications",
    params(("application_id" = i64, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Updated application", body = ApplicationResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Application not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email, application_id))]
pub async fn update_application(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(application_id): Path<ApplicationId>,
    Json(request): Json<ApplicationUpdateRequest>,
) -> Result<Json<ApplicationResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    let updated = repo
        .update(&current_user.email, application_id, &request.into())
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Application".to_string(),
            id: application_id.to_string(),
        })?;

    Ok(Json(ApplicationResponse::from(updated)))
}

/// Delete a job application
#[utoipa::path(
    delete,
    path = "/api/v1/applications/{application_id}",
    tag = "applications",
    params(("application_id" = i64, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Application not found"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email, application_id))]
pub async fn delete_application(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(application_id): Path<ApplicationId>,
) -> Result<StatusCode, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    let deleted = repo.delete(&current_user.email, application_id).await?;
    if !deleted {
        return Err(Error::NotFound {
            resource: "Application".to_string(),
            id: application_id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Per-status counts of the current user's applications
#[utoipa::path(
    get,
    path = "/api/v1/applications/status-summary",
    tag = "applications",
    responses(
        (status = 200, description = "Counts grouped by status", body = Vec<StatusCountResponse>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_token" = []))
)]
#[tracing::instrument(skip_all, fields(owner = %current_user.email))]
pub async fn status_summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<Vec<StatusCountResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    let counts = repo.status_summary(&current_user.email).await?;

    Ok(Json(counts.into_iter().map(StatusCountResponse::from).collect()))
}

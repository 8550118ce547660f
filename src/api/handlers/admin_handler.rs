//! Admin review handlers.
//!
//! Mounted behind both the authentication middleware and the admin
//! gate; every request re-reads the admin flag from storage before
//! reaching these handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{AdminApplicationView, ApplicationFilter, ApplicationStatus};
use crate::errors::AppResult;
use crate::services::{CurrentUser, DashboardSummary};
use crate::types::ApiResponse;

/// Admin listing filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AdminListQuery {
    /// Restrict to one event
    pub event_id: Option<Uuid>,
    /// Restrict to one status
    pub status: Option<ApplicationStatus>,
    /// Case-insensitive substring match on applicant name or owner email
    pub search: Option<String>,
}

impl From<AdminListQuery> for ApplicationFilter {
    fn from(query: AdminListQuery) -> Self {
        ApplicationFilter {
            event_id: query.event_id,
            status: query.status,
            search: query.search.filter(|s| !s.is_empty()),
        }
    }
}

/// Status review request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    /// New review status
    pub status: ApplicationStatus,
    /// Notes visible to other admins
    pub admin_notes: Option<String>,
}

/// Create admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/applications", get(list_applications))
        .route(
            "/applications/:id",
            get(get_application).patch(update_status),
        )
        .route("/dashboard", get(dashboard))
}

/// List applications across all users
#[utoipa::path(
    get,
    path = "/api/admin/applications",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(AdminListQuery),
    responses(
        (status = 200, description = "Applications matching the filters", body = [AdminApplicationView]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
        (status = 500, description = "Fetch error")
    )
)]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> AppResult<Json<ApiResponse<Vec<AdminApplicationView>>>> {
    let applications = state.admin.list(query.into()).await?;

    Ok(Json(ApiResponse::success(applications)))
}

/// Get any application by id
#[utoipa::path(
    get,
    path = "/api/admin/applications/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "Application with owner, event, and reviewer", body = AdminApplicationView),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Application not found"),
        (status = 500, description = "Fetch error")
    )
)]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<AdminApplicationView>>> {
    let application = state.admin.get(id).await?;

    Ok(Json(ApiResponse::success(application)))
}

/// Update the review status of an application
#[utoipa::path(
    patch,
    path = "/api/admin/applications/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Reviewed application", body = AdminApplicationView),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Application not found"),
        (status = 500, description = "Update error")
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<StatusUpdateRequest>,
) -> AppResult<Json<ApiResponse<AdminApplicationView>>> {
    let application = state
        .admin
        .review(user.id, id, payload.status, payload.admin_notes)
        .await?;

    Ok(Json(ApiResponse::success(application)))
}

/// Dashboard aggregate
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Status counts and recent submissions", body = DashboardSummary),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
        (status = 500, description = "Fetch error")
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DashboardSummary>>> {
    let summary = state.admin.dashboard().await?;

    Ok(Json(ApiResponse::success(summary)))
}

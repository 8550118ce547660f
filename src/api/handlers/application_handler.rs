//! Applicant-facing application handlers.
//!
//! All routes here require an authenticated session; the requester's
//! identity scopes every query, so these handlers can never touch
//! another user's applications.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{MAX_NAME_LENGTH, MIN_NAME_LENGTH, PHONE_PATTERN};
use crate::domain::{ApplicationPatch, ApplicationWithEvent, NewApplication};
use crate::errors::AppResult;
use crate::services::CurrentUser;
use crate::types::{ApiResponse, Created, MessageResponse};

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern must compile"));

/// International phone number; the empty string is accepted and later
/// collapsed to an unset value.
fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || PHONE_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("phone")
            .with_message("Please enter a valid phone number".into()))
    }
}

/// Optional name field; the empty string is accepted and later
/// collapsed to an unset value.
fn validate_optional_name(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count() as u64;
    if value.is_empty() || (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new("name_length")
            .with_message("Emergency contact name must be between 2 and 255 characters".into()))
    }
}

/// Collapse empty-string optionals to None
fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Application submission request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationRequest {
    /// Target event id
    pub event_id: Uuid,
    /// Name to register under
    #[validate(length(
        min = 2,
        max = 255,
        message = "Applicant name must be between 2 and 255 characters"
    ))]
    #[schema(example = "Jane Hiker", min_length = 2, max_length = 255)]
    pub applicant_name: String,
    /// Contact phone number
    #[validate(custom(function = validate_phone))]
    #[schema(example = "+31612345678")]
    pub phone_number: Option<String>,
    /// Emergency contact name
    #[validate(custom(function = validate_optional_name))]
    pub emergency_contact_name: Option<String>,
    /// Emergency contact phone number
    #[validate(custom(function = validate_phone))]
    pub emergency_contact_phone: Option<String>,
    /// Dietary restrictions, free text
    pub dietary_restrictions: Option<String>,
    /// Medical conditions, free text
    pub medical_conditions: Option<String>,
    /// Special requirements, free text
    pub special_requirements: Option<String>,
}

impl SubmitApplicationRequest {
    fn into_new_application(self) -> NewApplication {
        NewApplication {
            event_id: self.event_id,
            applicant_name: self.applicant_name,
            phone_number: normalize(self.phone_number),
            emergency_contact_name: normalize(self.emergency_contact_name),
            emergency_contact_phone: normalize(self.emergency_contact_phone),
            dietary_restrictions: normalize(self.dietary_restrictions),
            medical_conditions: normalize(self.medical_conditions),
            special_requirements: normalize(self.special_requirements),
        }
    }
}

/// Application update request. Absent fields are left unchanged;
/// optional fields sent as the empty string are cleared.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    #[validate(length(
        min = 2,
        max = 255,
        message = "Applicant name must be between 2 and 255 characters"
    ))]
    pub applicant_name: Option<String>,
    #[validate(custom(function = validate_phone))]
    pub phone_number: Option<String>,
    #[validate(custom(function = validate_optional_name))]
    pub emergency_contact_name: Option<String>,
    #[validate(custom(function = validate_phone))]
    pub emergency_contact_phone: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub medical_conditions: Option<String>,
    pub special_requirements: Option<String>,
}

impl UpdateApplicationRequest {
    fn into_patch(self) -> ApplicationPatch {
        ApplicationPatch {
            applicant_name: self.applicant_name,
            phone_number: self.phone_number.map(|v| normalize(Some(v))),
            emergency_contact_name: self.emergency_contact_name.map(|v| normalize(Some(v))),
            emergency_contact_phone: self.emergency_contact_phone.map(|v| normalize(Some(v))),
            dietary_restrictions: self.dietary_restrictions.map(|v| normalize(Some(v))),
            medical_conditions: self.medical_conditions.map(|v| normalize(Some(v))),
            special_requirements: self.special_requirements.map(|v| normalize(Some(v))),
        }
    }
}

/// Create application routes
pub fn application_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_my_applications).post(submit_application))
        .route(
            "/:id",
            get(get_my_application)
                .patch(update_my_application)
                .delete(delete_my_application),
        )
}

/// List the requester's applications
#[utoipa::path(
    get,
    path = "/api/applications",
    tag = "Applications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Requester's applications, newest first", body = [ApplicationWithEvent]),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Fetch error")
    )
)]
pub async fn list_my_applications(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<ApplicationWithEvent>>>> {
    let applications = state.applications.list_own(user.id).await?;

    Ok(Json(ApiResponse::success(applications)))
}

/// Get one of the requester's applications
#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "Application with its event", body = ApplicationWithEvent),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Not found or owned by someone else"),
        (status = 500, description = "Fetch error")
    )
)]
pub async fn get_my_application(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ApplicationWithEvent>>> {
    let application = state.applications.get_own(user.id, id).await?;

    Ok(Json(ApiResponse::success(application)))
}

/// Submit a new application
#[utoipa::path(
    post,
    path = "/api/applications",
    tag = "Applications",
    security(("bearer_auth" = [])),
    request_body = SubmitApplicationRequest,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationWithEvent),
        (status = 400, description = "Validation failed, event not applicable, or duplicate application"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Create error")
    )
)]
pub async fn submit_application(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<SubmitApplicationRequest>,
) -> AppResult<Created<ApplicationWithEvent>> {
    let application = state
        .applications
        .submit(user.id, payload.into_new_application())
        .await?;

    Ok(Created(application))
}

/// Update one of the requester's applications
#[utoipa::path(
    patch,
    path = "/api/applications/{id}",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    request_body = UpdateApplicationRequest,
    responses(
        (status = 200, description = "Updated application", body = ApplicationWithEvent),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Not found or owned by someone else"),
        (status = 500, description = "Update error")
    )
)]
pub async fn update_my_application(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateApplicationRequest>,
) -> AppResult<Json<ApiResponse<ApplicationWithEvent>>> {
    let application = state
        .applications
        .update_own(user.id, id, payload.into_patch())
        .await?;

    Ok(Json(ApiResponse::success(application)))
}

/// Delete one of the requester's applications
#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "Application deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Not found or owned by someone else"),
        (status = 500, description = "Delete error")
    )
)]
pub async fn delete_my_application(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MessageResponse>>> {
    state.applications.delete_own(user.id, id).await?;

    Ok(Json(ApiResponse::message("Application deleted successfully")))
}

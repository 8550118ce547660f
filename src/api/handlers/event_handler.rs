//! Event catalog handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::domain::EventSummary;
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Create event routes
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events))
        .route("/:id", get(get_event))
}

/// List active events
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    responses(
        (status = 200, description = "Active events with application counts", body = [EventSummary]),
        (status = 500, description = "Fetch error")
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<EventSummary>>>> {
    let events = state.events.list_events().await?;

    Ok(Json(ApiResponse::success(events)))
}

/// Get a single event by id
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event with application count", body = EventSummary),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Fetch error")
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<EventSummary>>> {
    let event = state.events.get_event(id).await?;

    Ok(Json(ApiResponse::success(event)))
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::notifier::{Notification, GEOFENCE_NOTIFICATION_ID};
use crate::registry::{format_coords, GeofencingRequest};
use crate::service::Dispatch;
use crate::status::{report_connection_failure, report_permission_denied, report_registration};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /api/landmarks ──────────────────────────────────────────

#[derive(Serialize)]
pub struct LandmarkInfo {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub formatted_coords: String,
}

pub async fn landmark_list(State(state): State<Arc<AppState>>) -> Json<Vec<LandmarkInfo>> {
    Json(
        state
            .landmarks
            .iter()
            .map(|lm| LandmarkInfo {
                name: lm.name.clone(),
                latitude: lm.latitude,
                longitude: lm.longitude,
                formatted_coords: format_coords(lm.latitude, lm.longitude),
            })
            .collect(),
    )
}

// ─── GET /api/geofences ──────────────────────────────────────────

pub async fn geofences(State(state): State<Arc<AppState>>) -> Json<GeofencingRequest> {
    Json(state.request.clone())
}

// ─── POST /api/events ────────────────────────────────────────────

#[derive(Serialize)]
pub struct EventResponse {
    pub notified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<Dispatch> for EventResponse {
    fn from(dispatch: Dispatch) -> Self {
        match dispatch {
            Dispatch::Notify { notification } => Self {
                notified: true,
                notification: Some(notification),
                reason: None,
            },
            Dispatch::Skip { reason } => Self {
                notified: false,
                notification: None,
                reason: Some(reason),
            },
        }
    }
}

pub async fn post_event(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<EventResponse>, ApiError> {
    let start = Instant::now();

    let (event, dispatch) = state
        .service
        .on_json(&body)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    log::info!(
        "POST /api/events ids={:?} -> {} ({:.1}ms)",
        event.ids,
        dispatch.description().unwrap_or("skipped"),
        start.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(Json(dispatch.into()))
}

// ─── GET/DELETE /api/notification ────────────────────────────────

pub async fn current_notification(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Notification>, ApiError> {
    state
        .slot
        .current()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "No geofence notification is showing"))
}

pub async fn dismiss_notification(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Notification>, ApiError> {
    let dismissed = state
        .slot
        .dismiss(GEOFENCE_NOTIFICATION_ID)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "No geofence notification is showing"))?;
    log::debug!("dismissed notification: {}", dismissed.title);
    Ok(Json(dismissed))
}

// ─── Status callbacks ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct StatusBody {
    pub code: i32,
}

#[derive(Serialize)]
pub struct FlashResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

fn flashed(state: &AppState, success: Option<bool>) -> Json<FlashResponse> {
    Json(FlashResponse {
        message: state.slot.last_flash().unwrap_or_default(),
        success,
    })
}

/// POST /api/status/registration
pub async fn registration_status(
    State(state): State<Arc<AppState>>,
    Json(body): Json<StatusBody>,
) -> Json<FlashResponse> {
    let status = report_registration(body.code, state.slot.as_ref());
    flashed(&state, Some(status.is_success()))
}

/// POST /api/status/connection
pub async fn connection_failure(
    State(state): State<Arc<AppState>>,
    Json(body): Json<StatusBody>,
) -> Json<FlashResponse> {
    report_connection_failure(body.code, state.slot.as_ref());
    flashed(&state, None)
}

/// POST /api/status/permission-denied
pub async fn permission_denied(State(state): State<Arc<AppState>>) -> Json<FlashResponse> {
    report_permission_denied(state.slot.as_ref());
    flashed(&state, None)
}

/// GET /api/flash
pub async fn last_flash(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FlashResponse>, ApiError> {
    state
        .slot
        .last_flash()
        .map(|message| Json(FlashResponse { message, success: None }))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "No message has been shown"))
}

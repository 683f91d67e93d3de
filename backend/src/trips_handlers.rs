// Handlers for the trips API endpoints
// Architecture: RESTful API over the TripStore trait

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::{
    CreateTripRequest, GpxExport, JoinTripRequest, LeaveTripRequest, TripListResponse,
    TripResponse,
};

use crate::AppState;
use crate::error::{ApiFailure, to_api_error};
use crate::gpx_export::export_trip;
use crate::store::RECENT_TRIPS_LIMIT;

/// GET /api/trips - List all trips
pub async fn list_trips(State(state): State<AppState>) -> Result<Json<TripListResponse>, ApiFailure> {
    state
        .store
        .list_trips()
        .map(|trips| Json(TripListResponse { trips }))
        .map_err(to_api_error)
}

/// GET /api/trips/recent - Most recently created trips
pub async fn recent_trips(
    State(state): State<AppState>,
) -> Result<Json<TripListResponse>, ApiFailure> {
    state
        .store
        .recent_trips(RECENT_TRIPS_LIMIT)
        .map(|trips| Json(TripListResponse { trips }))
        .map_err(to_api_error)
}

/// GET /api/trips/:id - Get a specific trip
pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<TripResponse>, ApiFailure> {
    state
        .store
        .get_trip(id)
        .map(|trip| Json(TripResponse { trip, message: None }))
        .map_err(to_api_error)
}

/// POST /api/trips - Create a trip from a finalized route
pub async fn create_trip(
    State(state): State<AppState>,
    Json(payload): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<TripResponse>), ApiFailure> {
    let trip = state.store.create_trip(payload).map_err(to_api_error)?;
    Ok((
        StatusCode::CREATED,
        Json(TripResponse {
            trip,
            message: Some("Trip created successfully".into()),
        }),
    ))
}

/// POST /api/trips/join - Add a rider to a trip
pub async fn join_trip(
    State(state): State<AppState>,
    Json(payload): Json<JoinTripRequest>,
) -> Result<Json<TripResponse>, ApiFailure> {
    let trip = state
        .store
        .join_trip(payload.trip_id, payload.rider)
        .map_err(to_api_error)?;
    let message = format!("You joined {}", trip.name);
    Ok(Json(TripResponse {
        trip,
        message: Some(message),
    }))
}

/// POST /api/trips/leave - Remove a rider from a trip
pub async fn leave_trip(
    State(state): State<AppState>,
    Json(payload): Json<LeaveTripRequest>,
) -> Result<Json<TripResponse>, ApiFailure> {
    let trip = state
        .store
        .leave_trip(payload.trip_id, &payload.rider_id)
        .map_err(to_api_error)?;
    let message = format!("You left {}", trip.name);
    Ok(Json(TripResponse {
        trip,
        message: Some(message),
    }))
}

/// GET /api/trips/:id/gpx - Export a trip's route as a GPX track
pub async fn export_trip_gpx(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<GpxExport>, ApiFailure> {
    let trip = state.store.get_trip(id).map_err(to_api_error)?;
    export_trip(&trip).map(Json).map_err(to_api_error)
}

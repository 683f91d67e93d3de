pub mod config;
pub mod directions;
pub mod error;
pub mod gpx_export;
pub mod store;
pub mod trips_handlers;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use shared::{DirectionsRequest, DirectionsResponse};
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::directions::{DirectionsError, DirectionsProxy};
use crate::error::{ApiFailure, to_api_error};
use crate::store::{InMemoryTripStore, TripStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TripStore>,
    pub directions: Arc<DirectionsProxy>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, DirectionsError> {
        let token = config.mapbox_token.clone();
        let store = if config.seed_demo_trips {
            InMemoryTripStore::with_demo_trips(token)
        } else {
            InMemoryTripStore::new(token)
        };
        let directions = DirectionsProxy::new(
            config.directions_url.clone(),
            config.directions_api_key.clone(),
        )?;
        Ok(Self {
            store: Arc::new(store),
            directions: Arc::new(directions),
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/trips",
            get(trips_handlers::list_trips).post(trips_handlers::create_trip),
        )
        .route("/api/trips/recent", get(trips_handlers::recent_trips))
        .route("/api/trips/join", post(trips_handlers::join_trip))
        .route("/api/trips/leave", post(trips_handlers::leave_trip))
        .route("/api/trips/:id", get(trips_handlers::get_trip))
        .route("/api/trips/:id/gpx", get(trips_handlers::export_trip_gpx))
        .route("/api/directions", post(directions_handler))
        .route("/api/directions/status", get(directions_status))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn directions_handler(
    State(state): State<AppState>,
    Json(req): Json<DirectionsRequest>,
) -> Result<Json<DirectionsResponse>, ApiFailure> {
    state
        .directions
        .resolve(&req)
        .await
        .map(Json)
        .map_err(to_api_error)
}

/// 204 when a provider is configured; the client treats 503 as "provider unavailable".
async fn directions_status(State(state): State<AppState>) -> Result<StatusCode, ApiFailure> {
    if state.directions.is_available() {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(to_api_error(DirectionsError::NotConfigured))
    }
}

use axum::{Json, http::StatusCode};
use shared::ApiError;
use thiserror::Error;

use crate::directions::DirectionsError;
use crate::store::StoreError;

pub type ApiFailure = (StatusCode, Json<ApiError>);

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to build GPX document: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
    #[error("trip has no route to export")]
    EmptyRoute,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Directions(#[from] DirectionsError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::InvalidTrip(_)) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::AlreadyJoined { .. } | StoreError::NotJoined { .. }) => {
                StatusCode::CONFLICT
            }
            AppError::Store(StoreError::Poisoned) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Directions(DirectionsError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Directions(DirectionsError::MissingEndpoints) => StatusCode::BAD_REQUEST,
            AppError::Directions(DirectionsError::Transport(_) | DirectionsError::Upstream(_)) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Export(ExportError::EmptyRoute) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Export(ExportError::Gpx(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert any handler error into the JSON error body sent to clients.
pub fn to_api_error(err: impl Into<AppError>) -> ApiFailure {
    let err = err.into();
    let status = err.status();
    if status.is_server_error() {
        tracing::error!("{err}");
    } else {
        tracing::debug!("request rejected ({status}): {err}");
    }
    (
        status,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_client_statuses() {
        assert_eq!(
            AppError::from(StoreError::NotFound(3)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(StoreError::AlreadyJoined {
                trip_id: 1,
                rider_id: "user2".into()
            })
            .status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn directions_errors_distinguish_unavailable_from_gateway() {
        assert_eq!(
            AppError::from(DirectionsError::NotConfigured).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::from(DirectionsError::Upstream(500)).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn api_error_carries_message() {
        let (status, Json(body)) = to_api_error(StoreError::NotFound(42));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Trip not found: 42");
    }
}

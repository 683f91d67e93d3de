use shared::DirectionsStatus;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter both a start and an end location")]
    MissingEndpoints,
    #[error("Please give your trip a name")]
    MissingName,
    #[error("Please create a route first")]
    EmptyRoute,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// Fatal for the session: the editor stays degraded until reload.
    #[error("Routing provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("Could not calculate route ({0:?}). Please try different locations.")]
    RouteNotFound(DirectionsStatus),
    #[error("Could not reach the routing provider: {0}")]
    TransportFailure(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl EditorError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_))
    }
}

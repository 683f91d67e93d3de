use std::time::Duration;

use reqwest::Client;
use shared::{DirectionsRequest, DirectionsResponse};

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    #[error("no directions provider configured")]
    NotConfigured,
    #[error("origin and destination are both required")]
    MissingEndpoints,
    #[error("directions provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("directions provider answered with HTTP {0}")]
    Upstream(u16),
}

/// Forwards directions requests to the external routing provider.
///
/// Non-OK provider statuses (`NOT_FOUND`, `ZERO_RESULTS`, ...) are part of a
/// successful response; only transport-level problems become errors.
pub struct DirectionsProxy {
    client: Client,
    upstream: Option<String>,
    api_key: Option<String>,
}

impl DirectionsProxy {
    /// Fails only when the HTTP client cannot be built (TLS backend setup).
    pub fn new(upstream: Option<String>, api_key: Option<String>) -> Result<Self, DirectionsError> {
        let client = Client::builder().timeout(UPSTREAM_TIMEOUT).build()?;
        Ok(Self {
            client,
            upstream,
            api_key,
        })
    }

    pub fn disabled() -> Result<Self, DirectionsError> {
        Self::new(None, None)
    }

    pub fn is_available(&self) -> bool {
        self.upstream.is_some()
    }

    pub async fn resolve(&self, req: &DirectionsRequest) -> Result<DirectionsResponse, DirectionsError> {
        let upstream = self.upstream.as_deref().ok_or(DirectionsError::NotConfigured)?;
        if req.origin.trim().is_empty() || req.destination.trim().is_empty() {
            return Err(DirectionsError::MissingEndpoints);
        }

        tracing::info!(
            "Directions request: {:?} -> {:?} ({} waypoints, {:?})",
            req.origin,
            req.destination,
            req.waypoints.len(),
            req.travel_mode
        );

        let mut request = self.client.post(upstream).json(req);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Directions provider returned HTTP {}", status);
            return Err(DirectionsError::Upstream(status.as_u16()));
        }

        let body: DirectionsResponse = response.json().await?;
        tracing::debug!(
            "Directions response: {:?} with {} points",
            body.status,
            body.path.len()
        );
        Ok(body)
    }
}

use std::future::Future;

use seed::{browser::fetch::FetchError, prelude::*};
use shared::{DirectionsRequest, DirectionsResponse};

use crate::error::EditorError;

const HTTP_SERVICE_UNAVAILABLE: u16 = 503;

/// Remote capability that turns endpoint text (plus optional via points)
/// into a routable polyline.
///
/// A non-OK provider status is a successful call: it comes back inside the
/// `DirectionsResponse`. Errors are reserved for transport problems and for a
/// provider that cannot be used at all.
pub trait RoutingProvider {
    fn resolve_route(
        &self,
        request: DirectionsRequest,
    ) -> impl Future<Output = Result<DirectionsResponse, EditorError>>;
}

/// Routing provider reached through the backend's `/directions` proxy.
#[derive(Debug, Clone)]
pub struct HttpRoutingProvider {
    directions_url: String,
}

impl HttpRoutingProvider {
    /// Probe the backend once; a missing provider makes the editor unusable
    /// for the rest of the session.
    pub async fn connect(api_root: &str) -> Result<Self, EditorError> {
        let status_url = format!("{api_root}/directions/status");
        let response = Request::new(status_url)
            .method(Method::Get)
            .fetch()
            .await
            .map_err(|err| EditorError::ProviderUnavailable(format!("{err:?}")))?;

        let status = response.status();
        if !status.is_ok() {
            return Err(EditorError::ProviderUnavailable(format!(
                "HTTP {} {}",
                status.code, status.text
            )));
        }

        Ok(Self {
            directions_url: format!("{api_root}/directions"),
        })
    }
}

impl RoutingProvider for HttpRoutingProvider {
    async fn resolve_route(&self, request: DirectionsRequest) -> Result<DirectionsResponse, EditorError> {
        let request = Request::new(self.directions_url.as_str())
            .method(Method::Post)
            .json(&request)
            .map_err(transport)?;
        let response = request.fetch().await.map_err(transport)?;

        let status = response.status();
        if status.code == HTTP_SERVICE_UNAVAILABLE {
            return Err(EditorError::ProviderUnavailable(status.text));
        }
        if !status.is_ok() {
            return Err(EditorError::TransportFailure(format!(
                "HTTP {} {}",
                status.code, status.text
            )));
        }

        response
            .json::<DirectionsResponse>()
            .await
            .map_err(transport)
    }
}

fn transport(err: FetchError) -> EditorError {
    EditorError::TransportFailure(format!("{err:?}"))
}

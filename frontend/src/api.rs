// Trips endpoints of the backend, called from seed commands.

use seed::{
    browser::fetch::{FetchError, Response},
    prelude::*,
};
use serde::{Serialize, de::DeserializeOwned};
use shared::{
    ApiError, CreateTripRequest, GpxExport, JoinTripRequest, LeaveTripRequest, Rider, Trip,
    TripListResponse, TripResponse,
};

pub fn api_root() -> String {
    if let Some(url) = option_env!("FRONTEND_API_ROOT") {
        return url.trim_end_matches('/').to_string();
    }
    "http://localhost:8080/api".to_string()
}

pub async fn fetch_trips() -> Result<Vec<Trip>, String> {
    get_json::<TripListResponse>(&format!("{}/trips", api_root()))
        .await
        .map(|list| list.trips)
}

pub async fn fetch_recent_trips() -> Result<Vec<Trip>, String> {
    get_json::<TripListResponse>(&format!("{}/trips/recent", api_root()))
        .await
        .map(|list| list.trips)
}

pub async fn fetch_trip(id: u32) -> Result<Trip, String> {
    get_json::<TripResponse>(&format!("{}/trips/{id}", api_root()))
        .await
        .map(|response| response.trip)
}

pub async fn create_trip(payload: CreateTripRequest) -> Result<TripResponse, String> {
    post_json(&format!("{}/trips", api_root()), &payload).await
}

pub async fn join_trip(trip_id: u32, rider: Rider) -> Result<TripResponse, String> {
    post_json(
        &format!("{}/trips/join", api_root()),
        &JoinTripRequest { trip_id, rider },
    )
    .await
}

pub async fn leave_trip(trip_id: u32, rider_id: String) -> Result<TripResponse, String> {
    post_json(
        &format!("{}/trips/leave", api_root()),
        &LeaveTripRequest { trip_id, rider_id },
    )
    .await
}

pub async fn export_gpx(trip_id: u32) -> Result<GpxExport, String> {
    get_json(&format!("{}/trips/{trip_id}/gpx", api_root())).await
}

async fn get_json<T: DeserializeOwned + 'static>(url: &str) -> Result<T, String> {
    let response = Request::new(url)
        .method(Method::Get)
        .fetch()
        .await
        .map_err(describe)?;
    read_body(response).await
}

async fn post_json<B: Serialize, T: DeserializeOwned + 'static>(
    url: &str,
    body: &B,
) -> Result<T, String> {
    let request = Request::new(url)
        .method(Method::Post)
        .json(body)
        .map_err(describe)?;
    let response = request.fetch().await.map_err(describe)?;
    read_body(response).await
}

async fn read_body<T: DeserializeOwned + 'static>(response: Response) -> Result<T, String> {
    let status = response.status();
    if !status.is_ok() {
        // Backend errors carry a readable message; fall back to the status line.
        return Err(match response.json::<ApiError>().await {
            Ok(api_error) => api_error.message,
            Err(_) => format!("HTTP {} {}", status.code, status.text),
        });
    }
    response.json::<T>().await.map_err(describe)
}

fn describe(err: FetchError) -> String {
    format!("{err:?}")
}

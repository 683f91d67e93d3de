// Module store - trip persistence behind a trait
// In-memory implementation; a durable backend only has to implement TripStore.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use shared::{Coordinate, CreateTripRequest, Difficulty, Rider, Trip, stats};

pub const RECENT_TRIPS_LIMIT: usize = 3;

const PREVIEW_STYLE_STREETS: &str = "streets-v11";
const PREVIEW_STYLE_OUTDOORS: &str = "outdoors-v11";
const PREVIEW_ZOOM: u8 = 13;
/// Used for the preview of a trip whose route is unexpectedly empty.
const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: 37.7749,
    lon: -122.4194,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Trip not found: {0}")]
    NotFound(u32),

    #[error("Invalid trip data: {0}")]
    InvalidTrip(String),

    #[error("Rider {rider_id} already joined trip {trip_id}")]
    AlreadyJoined { trip_id: u32, rider_id: String },

    #[error("Rider {rider_id} has not joined trip {trip_id}")]
    NotJoined { trip_id: u32, rider_id: String },

    #[error("Trip store lock poisoned")]
    Poisoned,
}

/// Trip persistence contract.
///
/// Implementations assign ids as `max(existing) + 1`, which is only sound
/// with a single writer.
pub trait TripStore: Send + Sync {
    /// All trips in insertion order.
    fn list_trips(&self) -> Result<Vec<Trip>, StoreError>;

    /// Newest trips first, at most `limit` of them.
    fn recent_trips(&self, limit: usize) -> Result<Vec<Trip>, StoreError>;

    fn get_trip(&self, id: u32) -> Result<Trip, StoreError>;

    /// Validate the request, derive statistics and store the new trip.
    fn create_trip(&self, req: CreateTripRequest) -> Result<Trip, StoreError>;

    fn join_trip(&self, id: u32, rider: Rider) -> Result<Trip, StoreError>;

    fn leave_trip(&self, id: u32, rider_id: &str) -> Result<Trip, StoreError>;
}

pub struct InMemoryTripStore {
    trips: RwLock<Vec<Trip>>,
    preview_token: Option<String>,
}

impl InMemoryTripStore {
    pub fn new(preview_token: Option<String>) -> Self {
        Self {
            trips: RwLock::new(Vec::new()),
            preview_token,
        }
    }

    /// Store pre-filled with the demo trips shown on a fresh install.
    pub fn with_demo_trips(preview_token: Option<String>) -> Self {
        let trips = demo_trips(preview_token.as_deref());
        Self {
            trips: RwLock::new(trips),
            preview_token,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Trip>>, StoreError> {
        self.trips.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Trip>>, StoreError> {
        self.trips.write().map_err(|_| StoreError::Poisoned)
    }

    fn update_trip<F>(&self, id: u32, update: F) -> Result<Trip, StoreError>
    where
        F: FnOnce(&mut Trip) -> Result<(), StoreError>,
    {
        let mut trips = self.write()?;
        let trip = trips
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        update(trip)?;
        Ok(trip.clone())
    }
}

impl TripStore for InMemoryTripStore {
    fn list_trips(&self) -> Result<Vec<Trip>, StoreError> {
        let trips = self.read()?.clone();
        tracing::debug!("Retrieved {} trips", trips.len());
        Ok(trips)
    }

    fn recent_trips(&self, limit: usize) -> Result<Vec<Trip>, StoreError> {
        let mut trips = self.read()?.clone();
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        trips.truncate(limit);
        Ok(trips)
    }

    fn get_trip(&self, id: u32) -> Result<Trip, StoreError> {
        self.read()?
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn create_trip(&self, req: CreateTripRequest) -> Result<Trip, StoreError> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidTrip("trip name is required".into()));
        }
        if req.route.is_empty() {
            return Err(StoreError::InvalidTrip("trip route is empty".into()));
        }

        let estimate = stats::estimate_path(&req.route);
        let center = req.route[0];

        let mut trips = self.write()?;
        let id = trips.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let trip = Trip {
            id,
            name: name.to_string(),
            description: req.description,
            distance: estimate.distance_label(),
            duration: estimate.duration_label(),
            difficulty: estimate
                .difficulty
                .unwrap_or_else(|| Difficulty::from_distance_km(estimate.distance_km)),
            route: req.route,
            created_at: Utc::now(),
            preview_image_url: preview_image_url(
                PREVIEW_STYLE_STREETS,
                center,
                PREVIEW_ZOOM,
                self.preview_token.as_deref(),
            ),
            joined_users: Vec::new(),
        };
        trips.push(trip.clone());

        tracing::info!("Trip created: {} (ID: {}, {} points)", trip.name, trip.id, trip.route.len());
        Ok(trip)
    }

    fn join_trip(&self, id: u32, rider: Rider) -> Result<Trip, StoreError> {
        let trip = self.update_trip(id, |trip| {
            if trip.has_rider(&rider.id) {
                return Err(StoreError::AlreadyJoined {
                    trip_id: id,
                    rider_id: rider.id.clone(),
                });
            }
            trip.joined_users.push(rider.clone());
            Ok(())
        })?;
        tracing::info!("Rider {} joined trip {}", rider.id, id);
        Ok(trip)
    }

    fn leave_trip(&self, id: u32, rider_id: &str) -> Result<Trip, StoreError> {
        let trip = self.update_trip(id, |trip| {
            if !trip.has_rider(rider_id) {
                return Err(StoreError::NotJoined {
                    trip_id: id,
                    rider_id: rider_id.to_string(),
                });
            }
            trip.joined_users.retain(|r| r.id != rider_id);
            Ok(())
        })?;
        tracing::info!("Rider {} left trip {}", rider_id, id);
        Ok(trip)
    }
}

/// Static map thumbnail centred on `center`.
pub fn preview_image_url(style: &str, center: Coordinate, zoom: u8, token: Option<&str>) -> String {
    let base = format!(
        "https://api.mapbox.com/styles/v1/mapbox/{style}/static/pin-s+3b82f6({lon},{lat})/[{lon},{lat},{zoom}]/300x200@2x",
        lon = center.lon,
        lat = center.lat,
    );
    match token {
        Some(token) => format!("{base}?access_token={token}"),
        None => base,
    }
}

fn demo_trips(token: Option<&str>) -> Vec<Trip> {
    let demo = |id: u32,
                name: &str,
                description: &str,
                distance: &str,
                duration: &str,
                difficulty: Difficulty,
                created_at: &str,
                route: Vec<Coordinate>,
                style: &str,
                zoom: u8| {
        let center = route.first().copied().unwrap_or(DEFAULT_CENTER);
        Trip {
            id,
            name: name.into(),
            description: description.into(),
            distance: distance.into(),
            duration: duration.into(),
            difficulty,
            created_at: created_at.parse::<DateTime<Utc>>().unwrap_or_default(),
            preview_image_url: preview_image_url(style, center, zoom, token),
            route,
            joined_users: Vec::new(),
        }
    };

    vec![
        demo(
            1,
            "City Park Loop",
            "A scenic ride through downtown parks",
            "5.2 km",
            "30 min",
            Difficulty::Easy,
            "2023-06-15T14:30:00Z",
            vec![
                Coordinate::new(37.7749, -122.4194),
                Coordinate::new(37.7748, -122.4180),
            ],
            PREVIEW_STYLE_STREETS,
            13,
        ),
        demo(
            2,
            "Mountain Trail",
            "Challenging mountain bike trail with great views",
            "12.8 km",
            "1.5 hrs",
            Difficulty::Hard,
            "2023-06-12T09:15:00Z",
            vec![Coordinate::new(37.8, -122.3), Coordinate::new(37.82, -122.32)],
            PREVIEW_STYLE_OUTDOORS,
            11,
        ),
        demo(
            3,
            "Coastal Ride",
            "Beautiful ocean views along the coastline",
            "8.5 km",
            "45 min",
            Difficulty::Moderate,
            "2023-06-10T16:45:00Z",
            vec![Coordinate::new(37.7, -122.5), Coordinate::new(37.72, -122.52)],
            PREVIEW_STYLE_OUTDOORS,
            12,
        ),
    ]
}

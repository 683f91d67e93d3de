//! Placeholder trip statistics derived from the number of points in a path.
//!
//! The figures are heuristics, not geography: every point counts for half a
//! kilometre, two and a half minutes of riding and ten metres of climbing.

use serde::{Deserialize, Serialize};

use crate::Coordinate;

const KM_PER_POINT: f64 = 0.5;
const MINUTES_PER_POINT: f64 = 2.5;
const METRES_PER_POINT: u32 = 10;
const HARD_ABOVE_KM: f64 = 10.0;
const MODERATE_ABOVE_KM: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub fn from_distance_km(distance_km: f64) -> Self {
        if distance_km > HARD_ABOVE_KM {
            Self::Hard
        } else if distance_km > MODERATE_ABOVE_KM {
            Self::Moderate
        } else {
            Self::Easy
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Moderate => "Moderate",
            Self::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripStats {
    pub point_count: usize,
    pub distance_km: f64,
    pub duration_min: u32,
    pub elevation_gain_m: u32,
    /// `None` while there is no route.
    pub difficulty: Option<Difficulty>,
}

impl TripStats {
    pub fn is_empty(&self) -> bool {
        self.point_count == 0
    }

    pub fn distance_label(&self) -> String {
        if self.is_empty() {
            return "0 km".to_string();
        }
        format!("{:.1} km", self.distance_km)
    }

    pub fn duration_label(&self) -> String {
        if self.duration_min <= 60 {
            format!("{} min", self.duration_min)
        } else {
            format!("{:.1} hrs", f64::from(self.duration_min) / 60.0)
        }
    }

    pub fn elevation_label(&self) -> String {
        format!("{} m", self.elevation_gain_m)
    }

    pub fn difficulty_label(&self) -> &'static str {
        self.difficulty.map_or("-", Difficulty::as_str)
    }
}

pub fn estimate(point_count: usize) -> TripStats {
    if point_count == 0 {
        return TripStats {
            point_count: 0,
            distance_km: 0.0,
            duration_min: 0,
            elevation_gain_m: 0,
            difficulty: None,
        };
    }

    let n = point_count as f64;
    let distance_km = n * KM_PER_POINT;
    TripStats {
        point_count,
        distance_km,
        duration_min: (n * MINUTES_PER_POINT).ceil() as u32,
        elevation_gain_m: u32::try_from(point_count)
            .unwrap_or(u32::MAX)
            .saturating_mul(METRES_PER_POINT),
        difficulty: Some(Difficulty::from_distance_km(distance_km)),
    }
}

pub fn estimate_path(path: &[Coordinate]) -> TripStats {
    estimate(path.len())
}

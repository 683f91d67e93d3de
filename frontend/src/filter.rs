use shared::{Difficulty, Trip};

/// Search box and difficulty selector of the trip list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripFilter {
    pub query: String,
    pub difficulty: Option<Difficulty>,
}

impl TripFilter {
    pub fn matches(&self, trip: &Trip) -> bool {
        if let Some(difficulty) = self.difficulty
            && trip.difficulty != difficulty
        {
            return false;
        }

        let query = self.query.trim().to_lowercase();
        query.is_empty()
            || trip.name.to_lowercase().contains(&query)
            || trip.description.to_lowercase().contains(&query)
    }

    /// Matching trips, newest first.
    pub fn apply<'a>(&self, trips: &'a [Trip]) -> Vec<&'a Trip> {
        let mut matching: Vec<&Trip> = trips.iter().filter(|trip| self.matches(trip)).collect();
        sort_newest_first(&mut matching);
        matching
    }
}

pub fn sort_newest_first(trips: &mut [&Trip]) {
    trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Value of the difficulty `<select>`; empty means "any".
pub fn parse_difficulty(value: &str) -> Option<Difficulty> {
    match value {
        "Easy" => Some(Difficulty::Easy),
        "Moderate" => Some(Difficulty::Moderate),
        "Hard" => Some(Difficulty::Hard),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use shared::Coordinate;

    use super::*;

    fn trip(id: u32, name: &str, description: &str, difficulty: Difficulty, day: u32) -> Trip {
        Trip {
            id,
            name: name.into(),
            description: description.into(),
            route: vec![Coordinate::new(37.77, -122.42)],
            distance: "1.0 km".into(),
            duration: "5 min".into(),
            difficulty,
            created_at: Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap(),
            preview_image_url: String::new(),
            joined_users: Vec::new(),
        }
    }

    fn trips() -> Vec<Trip> {
        vec![
            trip(1, "City Park Loop", "Easy ride", Difficulty::Easy, 1),
            trip(2, "Mountain Trail", "Steep climbs", Difficulty::Hard, 3),
            trip(3, "Coastal Ride", "Along the PARK shore", Difficulty::Moderate, 2),
        ]
    }

    #[test]
    fn empty_filter_sorts_newest_first() {
        let trips = trips();
        let ids: Vec<u32> = TripFilter::default().apply(&trips).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn query_matches_name_or_description_case_insensitively() {
        let trips = trips();
        let filter = TripFilter {
            query: "park".into(),
            difficulty: None,
        };
        let ids: Vec<u32> = filter.apply(&trips).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn difficulty_narrows_results() {
        let trips = trips();
        let filter = TripFilter {
            query: "park".into(),
            difficulty: Some(Difficulty::Easy),
        };
        let ids: Vec<u32> = filter.apply(&trips).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn unknown_difficulty_means_any() {
        assert_eq!(parse_difficulty("Hard"), Some(Difficulty::Hard));
        assert_eq!(parse_difficulty(""), None);
    }
}

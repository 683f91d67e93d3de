//! Server configuration from environment.

use std::env;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Upstream directions service; the proxy reports itself unavailable without it.
    pub directions_url: Option<String>,
    pub directions_api_key: Option<String>,
    pub mapbox_token: Option<String>,
    pub seed_demo_trips: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            directions_url: None,
            directions_api_key: None,
            mapbox_token: None,
            seed_demo_trips: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PLANNER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            directions_url: non_empty_var("DIRECTIONS_URL"),
            directions_api_key: non_empty_var("DIRECTIONS_API_KEY"),
            mapbox_token: non_empty_var("MAPBOX_TOKEN"),
            seed_demo_trips: env::var("SEED_DEMO_TRIPS")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

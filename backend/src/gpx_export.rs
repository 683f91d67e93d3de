use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};
use shared::{Coordinate, GpxExport, Trip};

use crate::error::ExportError;

pub fn encode_route_as_gpx(name: &str, path: &[Coordinate]) -> Result<String, ExportError> {
    if path.is_empty() {
        return Err(ExportError::EmptyRoute);
    }

    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("bike_trip_planner".into()),
        ..Default::default()
    };
    let mut track = Track {
        name: Some(name.to_string()),
        ..Default::default()
    };

    let mut segment = TrackSegment::new();
    for waypoint in path.iter().map(to_waypoint) {
        segment.points.push(waypoint);
    }
    track.segments.push(segment);
    gpx.tracks.push(track);

    let mut buffer = Vec::new();
    gpx::write(&gpx, &mut buffer)?;
    Ok(BASE64.encode(buffer))
}

pub fn export_trip(trip: &Trip) -> Result<GpxExport, ExportError> {
    Ok(GpxExport {
        file_name: format!("{}.gpx", file_stem(&trip.name, trip.id)),
        gpx_base64: encode_route_as_gpx(&trip.name, &trip.route)?,
    })
}

fn to_waypoint(coord: &Coordinate) -> Waypoint {
    Waypoint::new(Point::new(coord.lon, coord.lat))
}

fn file_stem(name: &str, id: u32) -> String {
    let slug: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        format!("trip-{id}")
    } else {
        slug
    }
}

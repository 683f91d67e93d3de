//! Interactive route editing.
//!
//! [`RouteEditor`] owns the displayed path and the draggable control points
//! sampled from it. It never talks to the network itself: every operation
//! that needs the routing provider hands back a [`PendingRoute`], and the
//! caller feeds the provider's answer to [`RouteEditor::apply_route`]. The
//! async helpers (`request_route`, `handle_control_point_drag`, ...) run that
//! round trip against any [`RoutingProvider`].
//!
//! Each issued request is stamped with a generation. Only the answer to the
//! newest request is applied; anything older is reported as
//! [`RouteOutcome::Stale`] and dropped.

use serde::{Deserialize, Serialize};
use shared::{
    ControlPoint, Coordinate, DirectionsRequest, DirectionsResponse, RouteBounds, TravelMode,
    TripStats, Via, stats,
};

use crate::error::{EditorError, ValidationError};
use crate::provider::RoutingProvider;

pub const MAX_CONTROL_POINTS: usize = 5;
const MIN_PATH_FOR_CONTROL_POINTS: usize = 4;
const POINTS_PER_CONTROL_POINT: usize = 4;

/// Evenly spaced handles along `path`, leaving a margin before the first and
/// after the last one. Paths shorter than four points get none.
pub fn derive_control_points(path: &[Coordinate]) -> Vec<ControlPoint> {
    if path.len() < MIN_PATH_FOR_CONTROL_POINTS {
        return Vec::new();
    }

    let count = (path.len() / POINTS_PER_CONTROL_POINT).min(MAX_CONTROL_POINTS);
    let step = path.len() / (count + 1);

    (1..=count)
        .filter_map(|i| {
            path.get(i * step).map(|&position| ControlPoint {
                id: format!("marker-{i}"),
                position,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointField {
    Start,
    End,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    pub start: String,
    pub end: String,
}

impl Endpoints {
    pub fn is_complete(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }
}

/// Restrictions handed to the place-autocomplete widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutocompleteOptions {
    pub types: Vec<String>,
    pub country: String,
    pub fields: Vec<String>,
}

impl Default for AutocompleteOptions {
    fn default() -> Self {
        Self {
            types: vec!["address".into()],
            country: "us".into(),
            fields: vec!["address_components".into(), "geometry".into(), "name".into()],
        }
    }
}

/// What the autocomplete widget reports when the user picks a suggestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlaceSelection {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Endpoints only; a successful answer regenerates the control points.
    Initial,
    /// Routed through the current control points; they are left as they are.
    Waypoints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTicket {
    generation: u64,
    kind: RequestKind,
}

impl RouteTicket {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A provider call the caller still has to perform.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRoute {
    pub ticket: RouteTicket,
    pub request: DirectionsRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Applied { kind: RequestKind, points: usize },
    /// A newer request was issued (or the editor was cleared) meanwhile.
    Stale,
}

pub type RouteChangeCallback = Box<dyn FnMut(&[Coordinate], Option<RouteBounds>)>;

pub struct RouteEditor {
    endpoints: Endpoints,
    travel_mode: TravelMode,
    path: Vec<Coordinate>,
    control_points: Vec<ControlPoint>,
    bounds: Option<RouteBounds>,
    stats: TripStats,
    generation: u64,
    unavailable: Option<String>,
    on_route_change: Option<RouteChangeCallback>,
}

impl Default for RouteEditor {
    fn default() -> Self {
        Self::new(TravelMode::Bicycling)
    }
}

impl std::fmt::Debug for RouteEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEditor")
            .field("endpoints", &self.endpoints)
            .field("travel_mode", &self.travel_mode)
            .field("path_len", &self.path.len())
            .field("control_points", &self.control_points)
            .field("generation", &self.generation)
            .field("unavailable", &self.unavailable)
            .finish()
    }
}

impl RouteEditor {
    pub fn new(travel_mode: TravelMode) -> Self {
        Self {
            endpoints: Endpoints::default(),
            travel_mode,
            path: Vec::new(),
            control_points: Vec::new(),
            bounds: None,
            stats: stats::estimate(0),
            generation: 0,
            unavailable: None,
            on_route_change: None,
        }
    }

    /// Called with the new path and its bounds every time a provider answer
    /// replaces it, and with an empty path on [`RouteEditor::clear`].
    pub fn on_route_change(
        &mut self,
        callback: impl FnMut(&[Coordinate], Option<RouteBounds>) + 'static,
    ) {
        self.on_route_change = Some(Box::new(callback));
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    pub fn has_route(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    pub fn bounds(&self) -> Option<RouteBounds> {
        self.bounds
    }

    pub fn stats(&self) -> &TripStats {
        &self.stats
    }

    pub fn is_unavailable(&self) -> bool {
        self.unavailable.is_some()
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        self.unavailable.as_deref()
    }

    pub fn set_travel_mode(&mut self, mode: TravelMode) {
        self.travel_mode = mode;
    }

    pub fn set_endpoint(&mut self, field: EndpointField, text: impl Into<String>) {
        let text = text.into();
        match field {
            EndpointField::Start => self.endpoints.start = text,
            EndpointField::End => self.endpoints.end = text,
        }
    }

    pub fn set_start(&mut self, text: impl Into<String>) {
        self.set_endpoint(EndpointField::Start, text);
    }

    pub fn set_end(&mut self, text: impl Into<String>) {
        self.set_endpoint(EndpointField::End, text);
    }

    /// Replace the endpoint text with the provider's display name, verbatim.
    /// Returns false when the selection carried no name.
    pub fn select_place(&mut self, field: EndpointField, place: &PlaceSelection) -> bool {
        match place.name.as_deref().filter(|name| !name.is_empty()) {
            Some(name) => {
                self.set_endpoint(field, name);
                true
            }
            None => false,
        }
    }

    /// Enter the degraded state. Every later request fails without reaching
    /// the provider.
    pub fn mark_unavailable(&mut self, reason: impl Into<String>) {
        self.unavailable = Some(reason.into());
    }

    /// Drop the current route. Responses to requests issued before this call
    /// are ignored when they arrive.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.path.clear();
        self.control_points.clear();
        self.bounds = None;
        self.stats = stats::estimate(0);
        self.notify();
    }

    /// Prepare a plain start-to-end request.
    pub fn begin_route(&mut self) -> Result<PendingRoute, EditorError> {
        self.begin(RequestKind::Initial, Vec::new())
    }

    /// Prepare a request routed through every control point, in order, as
    /// non-stopping via points.
    pub fn begin_waypoint_route(&mut self) -> Result<PendingRoute, EditorError> {
        let waypoints = self
            .control_points
            .iter()
            .map(|cp| Via {
                position: cp.position,
                stopover: false,
            })
            .collect();
        self.begin(RequestKind::Waypoints, waypoints)
    }

    /// Move a control point and prepare the reroute through the whole set.
    ///
    /// Unknown ids are ignored. The new position is kept even if no request
    /// can be issued (missing endpoints) or the reroute later fails.
    pub fn drag_control_point(
        &mut self,
        id: &str,
        position: Coordinate,
    ) -> Result<Option<PendingRoute>, EditorError> {
        let Some(point) = self.control_points.iter_mut().find(|cp| cp.id == id) else {
            return Ok(None);
        };
        point.position = position;

        match self.begin_waypoint_route() {
            Ok(pending) => Ok(Some(pending)),
            Err(EditorError::Validation(ValidationError::MissingEndpoints)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Feed back the provider's answer to a request issued by this editor.
    ///
    /// On success the path is replaced wholesale, bounds and statistics are
    /// recomputed, control points are regenerated for initial requests only,
    /// and the route-change callback fires once. On failure nothing changes.
    pub fn apply_route(
        &mut self,
        ticket: RouteTicket,
        result: Result<DirectionsResponse, EditorError>,
    ) -> Result<RouteOutcome, EditorError> {
        if ticket.generation != self.generation {
            return Ok(RouteOutcome::Stale);
        }

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                if let EditorError::ProviderUnavailable(reason) = &err {
                    self.mark_unavailable(reason.clone());
                }
                return Err(err);
            }
        };
        if !response.status.is_ok() {
            return Err(EditorError::RouteNotFound(response.status));
        }
        if response.path.len() < 2 {
            return Err(EditorError::TransportFailure(format!(
                "provider returned a route with {} point(s)",
                response.path.len()
            )));
        }

        self.bounds = response
            .bounds
            .or_else(|| RouteBounds::from_path(&response.path));
        self.path = response.path;
        if ticket.kind == RequestKind::Initial {
            self.control_points = derive_control_points(&self.path);
        }
        self.stats = stats::estimate_path(&self.path);
        self.notify();

        Ok(RouteOutcome::Applied {
            kind: ticket.kind,
            points: self.path.len(),
        })
    }

    pub async fn request_route<P: RoutingProvider>(
        &mut self,
        provider: &P,
    ) -> Result<RouteOutcome, EditorError> {
        let pending = self.begin_route()?;
        self.resolve(provider, pending).await
    }

    pub async fn request_route_with_waypoints<P: RoutingProvider>(
        &mut self,
        provider: &P,
    ) -> Result<RouteOutcome, EditorError> {
        let pending = self.begin_waypoint_route()?;
        self.resolve(provider, pending).await
    }

    /// Drag handler: `Ok(None)` when nothing was sent to the provider.
    pub async fn handle_control_point_drag<P: RoutingProvider>(
        &mut self,
        provider: &P,
        id: &str,
        position: Coordinate,
    ) -> Result<Option<RouteOutcome>, EditorError> {
        match self.drag_control_point(id, position)? {
            Some(pending) => self.resolve(provider, pending).await.map(Some),
            None => Ok(None),
        }
    }

    async fn resolve<P: RoutingProvider>(
        &mut self,
        provider: &P,
        pending: PendingRoute,
    ) -> Result<RouteOutcome, EditorError> {
        let result = provider.resolve_route(pending.request).await;
        self.apply_route(pending.ticket, result)
    }

    fn begin(&mut self, kind: RequestKind, waypoints: Vec<Via>) -> Result<PendingRoute, EditorError> {
        if let Some(reason) = &self.unavailable {
            return Err(EditorError::ProviderUnavailable(reason.clone()));
        }
        if !self.endpoints.is_complete() {
            return Err(ValidationError::MissingEndpoints.into());
        }

        self.generation += 1;
        Ok(PendingRoute {
            ticket: RouteTicket {
                generation: self.generation,
                kind,
            },
            request: DirectionsRequest {
                origin: self.endpoints.start.clone(),
                destination: self.endpoints.end.clone(),
                travel_mode: self.travel_mode,
                waypoints,
                optimize_waypoints: false,
            },
        })
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_route_change.as_mut() {
            callback(&self.path, self.bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
        rc::Rc,
    };

    use shared::DirectionsStatus;

    use super::*;

    /// Provider answering from a script and recording every request it sees.
    #[derive(Default)]
    struct ScriptedProvider {
        answers: RefCell<VecDeque<Result<DirectionsResponse, EditorError>>>,
        requests: RefCell<Vec<DirectionsRequest>>,
    }

    impl ScriptedProvider {
        fn answering(answers: Vec<Result<DirectionsResponse, EditorError>>) -> Self {
            Self {
                answers: RefCell::new(answers.into()),
                requests: RefCell::default(),
            }
        }

        fn calls(&self) -> usize {
            self.requests.borrow().len()
        }

        fn last_request(&self) -> DirectionsRequest {
            self.requests.borrow().last().cloned().expect("a request")
        }
    }

    impl RoutingProvider for ScriptedProvider {
        async fn resolve_route(
            &self,
            request: DirectionsRequest,
        ) -> Result<DirectionsResponse, EditorError> {
            self.requests.borrow_mut().push(request);
            self.answers
                .borrow_mut()
                .pop_front()
                .expect("scripted answer")
        }
    }

    fn line(points: usize) -> Vec<Coordinate> {
        (0..points)
            .map(|i| Coordinate::new(37.77 + i as f64 * 0.001, -122.42 + i as f64 * 0.001))
            .collect()
    }

    fn ok(path: Vec<Coordinate>) -> Result<DirectionsResponse, EditorError> {
        Ok(DirectionsResponse {
            status: DirectionsStatus::Ok,
            path,
            bounds: None,
        })
    }

    fn status(status: DirectionsStatus) -> Result<DirectionsResponse, EditorError> {
        Ok(DirectionsResponse {
            status,
            path: Vec::new(),
            bounds: None,
        })
    }

    fn editor_with_endpoints() -> (RouteEditor, Rc<Cell<usize>>) {
        let mut editor = RouteEditor::default();
        editor.set_start("123 Main St");
        editor.set_end("456 Oak Ave");
        let notified = Rc::new(Cell::new(0));
        let counter = Rc::clone(&notified);
        editor.on_route_change(move |_, _| counter.set(counter.get() + 1));
        (editor, notified)
    }

    #[test]
    fn short_paths_get_no_control_points() {
        for len in 0..4 {
            assert!(derive_control_points(&line(len)).is_empty(), "len {len}");
        }
    }

    #[test]
    fn eight_point_path_samples_indices_two_and_four() {
        let path = line(8);
        let points = derive_control_points(&path);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].id, "marker-1");
        assert_eq!(points[0].position, path[2]);
        assert_eq!(points[1].id, "marker-2");
        assert_eq!(points[1].position, path[4]);
    }

    #[test]
    fn control_points_are_capped_at_five() {
        let path = line(400);
        let points = derive_control_points(&path);
        assert_eq!(points.len(), MAX_CONTROL_POINTS);
        // step = 400 / 6 = 66
        assert_eq!(points[4].position, path[330]);
    }

    #[tokio::test]
    async fn initial_route_replaces_path_and_derives_control_points() {
        let (mut editor, notified) = editor_with_endpoints();
        let provider = ScriptedProvider::answering(vec![ok(line(8))]);

        let outcome = editor.request_route(&provider).await.unwrap();

        assert_eq!(
            outcome,
            RouteOutcome::Applied {
                kind: RequestKind::Initial,
                points: 8
            }
        );
        assert_eq!(editor.path().len(), 8);
        assert_eq!(editor.control_points().len(), 2);
        assert_eq!(notified.get(), 1);
        assert_eq!(editor.stats().distance_label(), "4.0 km");
        assert!(editor.bounds().is_some());

        let request = provider.last_request();
        assert_eq!(request.origin, "123 Main St");
        assert_eq!(request.destination, "456 Oak Ave");
        assert_eq!(request.travel_mode, TravelMode::Bicycling);
        assert!(request.waypoints.is_empty());
    }

    #[tokio::test]
    async fn provider_bounds_are_preferred() {
        let (mut editor, _) = editor_with_endpoints();
        let bounds = RouteBounds {
            min_lat: 1.0,
            max_lat: 2.0,
            min_lon: 3.0,
            max_lon: 4.0,
        };
        let provider = ScriptedProvider::answering(vec![Ok(DirectionsResponse {
            status: DirectionsStatus::Ok,
            path: line(3),
            bounds: Some(bounds),
        })]);

        editor.request_route(&provider).await.unwrap();
        assert_eq!(editor.bounds(), Some(bounds));
    }

    #[tokio::test]
    async fn route_change_callback_receives_provider_bounds() {
        let mut editor = RouteEditor::default();
        editor.set_start("123 Main St");
        editor.set_end("456 Oak Ave");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        editor.on_route_change(move |path, bounds| sink.borrow_mut().push((path.len(), bounds)));

        let bounds = RouteBounds {
            min_lat: 1.0,
            max_lat: 2.0,
            min_lon: 3.0,
            max_lon: 4.0,
        };
        let provider = ScriptedProvider::answering(vec![Ok(DirectionsResponse {
            status: DirectionsStatus::Ok,
            path: line(3),
            bounds: Some(bounds),
        })]);
        editor.request_route(&provider).await.unwrap();
        editor.clear();

        assert_eq!(*seen.borrow(), vec![(3, Some(bounds)), (0, None)]);
    }

    #[tokio::test]
    async fn not_found_leaves_state_untouched() {
        let (mut editor, notified) = editor_with_endpoints();
        let provider = ScriptedProvider::answering(vec![status(DirectionsStatus::NotFound)]);

        let err = editor.request_route(&provider).await.unwrap_err();

        assert_eq!(err, EditorError::RouteNotFound(DirectionsStatus::NotFound));
        assert!(editor.path().is_empty());
        assert!(editor.control_points().is_empty());
        assert_eq!(notified.get(), 0);
        assert!(!editor.is_unavailable());
    }

    #[tokio::test]
    async fn failure_after_success_keeps_previous_route() {
        let (mut editor, notified) = editor_with_endpoints();
        let provider = ScriptedProvider::answering(vec![
            ok(line(8)),
            Err(EditorError::TransportFailure("offline".into())),
        ]);

        editor.request_route(&provider).await.unwrap();
        let before = editor.path().to_vec();
        let err = editor.request_route(&provider).await.unwrap_err();

        assert!(matches!(err, EditorError::TransportFailure(_)));
        assert_eq!(editor.path(), before.as_slice());
        assert_eq!(editor.control_points().len(), 2);
        assert_eq!(notified.get(), 1);
    }

    #[tokio::test]
    async fn missing_endpoint_is_rejected_without_calling_provider() {
        let mut editor = RouteEditor::default();
        editor.set_start("123 Main St");
        let provider = ScriptedProvider::default();

        let err = editor.request_route(&provider).await.unwrap_err();

        assert_eq!(err, EditorError::Validation(ValidationError::MissingEndpoints));
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn whitespace_endpoints_count_as_entered() {
        let mut editor = RouteEditor::default();
        editor.set_start(" ");
        editor.set_end("456 Oak Ave");

        let pending = editor.begin_route().unwrap();
        assert_eq!(pending.request.origin, " ");

        editor.set_start("");
        assert_eq!(
            editor.begin_route().unwrap_err(),
            EditorError::Validation(ValidationError::MissingEndpoints)
        );
    }

    #[tokio::test]
    async fn single_point_route_is_rejected() {
        let (mut editor, notified) = editor_with_endpoints();
        let provider = ScriptedProvider::answering(vec![ok(line(1))]);

        let err = editor.request_route(&provider).await.unwrap_err();
        assert!(matches!(err, EditorError::TransportFailure(_)));
        assert!(editor.path().is_empty());
        assert_eq!(notified.get(), 0);
    }

    #[tokio::test]
    async fn drag_reroutes_through_every_control_point_in_order() {
        let (mut editor, notified) = editor_with_endpoints();
        let rerouted = line(12);
        let provider = ScriptedProvider::answering(vec![ok(line(8)), ok(rerouted.clone())]);
        editor.request_route(&provider).await.unwrap();
        let before = editor.control_points().to_vec();

        let moved = Coordinate::new(37.9, -122.3);
        let outcome = editor
            .handle_control_point_drag(&provider, "marker-2", moved)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Some(RouteOutcome::Applied {
                kind: RequestKind::Waypoints,
                points: 12
            })
        );
        assert_eq!(editor.path(), rerouted.as_slice());
        assert_eq!(notified.get(), 2);

        // stats and bounds follow the rerouted path
        assert_eq!(editor.stats().point_count, 12);
        assert_eq!(editor.stats().distance_label(), "6.0 km");
        assert_eq!(editor.stats().difficulty_label(), "Moderate");
        assert_eq!(editor.bounds(), RouteBounds::from_path(&rerouted));

        // the handle set is not regenerated from the new path
        let after = editor.control_points();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1].id, "marker-2");
        assert_eq!(after[1].position, moved);

        let request = provider.last_request();
        assert!(!request.optimize_waypoints);
        let vias: Vec<_> = request.waypoints.iter().map(|w| w.position).collect();
        assert_eq!(vias, vec![before[0].position, moved]);
        assert!(request.waypoints.iter().all(|w| !w.stopover));
    }

    #[tokio::test]
    async fn waypoint_reroute_recomputes_stats_and_bounds() {
        let (mut editor, _) = editor_with_endpoints();
        let provider = ScriptedProvider::answering(vec![ok(line(8)), ok(line(24))]);
        editor.request_route(&provider).await.unwrap();
        let bounds_before = editor.bounds();

        editor.request_route_with_waypoints(&provider).await.unwrap();

        assert_eq!(editor.stats().distance_label(), "12.0 km");
        assert_eq!(editor.stats().difficulty_label(), "Hard");
        assert_eq!(editor.stats().duration_label(), "60 min");
        assert_ne!(editor.bounds(), bounds_before);
        assert_eq!(editor.bounds(), RouteBounds::from_path(&line(24)));
    }

    #[tokio::test]
    async fn failed_drag_keeps_dropped_position_and_old_path() {
        let (mut editor, notified) = editor_with_endpoints();
        let provider = ScriptedProvider::answering(vec![
            ok(line(8)),
            status(DirectionsStatus::ZeroResults),
        ]);
        editor.request_route(&provider).await.unwrap();
        let path_before = editor.path().to_vec();

        let moved = Coordinate::new(38.0, -122.0);
        let err = editor
            .handle_control_point_drag(&provider, "marker-1", moved)
            .await
            .unwrap_err();

        assert_eq!(err, EditorError::RouteNotFound(DirectionsStatus::ZeroResults));
        assert_eq!(editor.path(), path_before.as_slice());
        assert_eq!(editor.control_points()[0].position, moved);
        assert_eq!(notified.get(), 1);
    }

    #[tokio::test]
    async fn unknown_control_point_is_ignored() {
        let (mut editor, _) = editor_with_endpoints();
        let provider = ScriptedProvider::answering(vec![ok(line(8))]);
        editor.request_route(&provider).await.unwrap();
        let before = editor.control_points().to_vec();

        let outcome = editor
            .handle_control_point_drag(&provider, "marker-9", Coordinate::new(0.0, 0.0))
            .await
            .unwrap();

        assert_eq!(outcome, None);
        assert_eq!(editor.control_points(), before.as_slice());
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn drag_without_endpoints_moves_the_point_only() {
        let mut editor = RouteEditor::default();
        editor.set_start("123 Main St");
        editor.set_end("456 Oak Ave");
        let pending = editor.begin_route().unwrap();
        editor.apply_route(pending.ticket, ok(line(8))).unwrap();
        editor.set_end("");

        let moved = Coordinate::new(1.0, 2.0);
        let pending = editor.drag_control_point("marker-1", moved).unwrap();

        assert!(pending.is_none());
        assert_eq!(editor.control_points()[0].position, moved);
    }

    #[test]
    fn response_to_superseded_request_is_dropped() {
        let (mut editor, notified) = editor_with_endpoints();
        let first = editor.begin_route().unwrap();
        let second = editor.begin_route().unwrap();

        let newest = line(6);
        let applied = editor.apply_route(second.ticket, ok(newest.clone())).unwrap();
        assert!(matches!(applied, RouteOutcome::Applied { .. }));

        let late = editor.apply_route(first.ticket, ok(line(20))).unwrap();
        assert_eq!(late, RouteOutcome::Stale);
        assert_eq!(editor.path(), newest.as_slice());
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn stale_failure_is_not_reported() {
        let (mut editor, _) = editor_with_endpoints();
        let first = editor.begin_route().unwrap();
        let _second = editor.begin_route().unwrap();

        let late = editor.apply_route(first.ticket, status(DirectionsStatus::NotFound));
        assert_eq!(late, Ok(RouteOutcome::Stale));
    }

    #[test]
    fn clear_discards_in_flight_responses() {
        let (mut editor, notified) = editor_with_endpoints();
        let pending = editor.begin_route().unwrap();
        editor.clear();

        let late = editor.apply_route(pending.ticket, ok(line(8))).unwrap();
        assert_eq!(late, RouteOutcome::Stale);
        assert!(editor.path().is_empty());
        assert_eq!(editor.stats().difficulty_label(), "-");
        // clear itself notifies with the empty path
        assert_eq!(notified.get(), 1);
    }

    #[tokio::test]
    async fn unavailable_provider_degrades_the_editor() {
        let (mut editor, _) = editor_with_endpoints();
        let provider = ScriptedProvider::answering(vec![Err(EditorError::ProviderUnavailable(
            "HTTP 503".into(),
        ))]);

        let err = editor.request_route(&provider).await.unwrap_err();
        assert!(err.is_fatal());
        assert!(editor.is_unavailable());

        let again = editor.request_route(&provider).await.unwrap_err();
        assert_eq!(again, EditorError::ProviderUnavailable("HTTP 503".into()));
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn place_selection_overwrites_endpoint_verbatim() {
        let mut editor = RouteEditor::default();
        editor.set_start("123 ma");

        let picked = PlaceSelection {
            name: Some("123 Main St".into()),
        };
        assert!(editor.select_place(EndpointField::Start, &picked));
        assert_eq!(editor.endpoints().start, "123 Main St");

        assert!(!editor.select_place(EndpointField::Start, &PlaceSelection::default()));
        assert_eq!(editor.endpoints().start, "123 Main St");
    }

    #[test]
    fn autocomplete_defaults_to_us_addresses() {
        let options = AutocompleteOptions::default();
        assert_eq!(options.types, vec!["address"]);
        assert_eq!(options.country, "us");
    }

    mod proptests {
        use std::collections::HashSet;

        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_control_points_are_sparse_ordered_samples(len in 4usize..500) {
                let path = line(len);
                let points = derive_control_points(&path);

                prop_assert!((1..=MAX_CONTROL_POINTS).contains(&points.len()));

                let indices: Vec<usize> = points
                    .iter()
                    .map(|cp| path.iter().position(|c| *c == cp.position).expect("sampled from path"))
                    .collect();
                prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));

                let ids: HashSet<_> = points.iter().map(|cp| cp.id.as_str()).collect();
                prop_assert_eq!(ids.len(), points.len());
            }

            #[test]
            fn prop_control_points_are_deterministic(len in 0usize..200) {
                let path = line(len);
                prop_assert_eq!(derive_control_points(&path), derive_control_points(&path));
            }

            #[test]
            fn prop_drag_preserves_ids_and_size(len in 4usize..100, pick in 0usize..5, lat in -80.0f64..80.0) {
                let mut editor = RouteEditor::default();
                editor.set_start("a");
                editor.set_end("b");
                let pending = editor.begin_route().unwrap();
                editor.apply_route(pending.ticket, ok(line(len))).unwrap();

                let before: Vec<String> = editor.control_points().iter().map(|cp| cp.id.clone()).collect();
                let id = before[pick % before.len()].clone();
                editor.drag_control_point(&id, Coordinate::new(lat, 0.0)).unwrap();

                let after: Vec<String> = editor.control_points().iter().map(|cp| cp.id.clone()).collect();
                prop_assert_eq!(before, after);
            }
        }
    }
}

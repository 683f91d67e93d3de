pub mod api;
pub mod draft;
pub mod editor;
pub mod error;
pub mod filter;
pub mod provider;

use seed::{prelude::*, virtual_dom::AtValue, *};
use serde::Deserialize;
use serde_wasm_bindgen::to_value;
use shared::{
    ControlPoint, Coordinate, DirectionsResponse, GpxExport, RouteBounds, Rider, TravelMode, Trip,
    TripResponse,
};
use wasm_bindgen::{
    JsCast,
    prelude::{JsValue, wasm_bindgen},
};

use crate::draft::TripDraft;
use crate::editor::{
    AutocompleteOptions, EndpointField, PendingRoute, PlaceSelection, RequestKind, RouteEditor,
    RouteOutcome, RouteTicket,
};
use crate::error::EditorError;
use crate::filter::{TripFilter, parse_difficulty};
use crate::provider::{HttpRoutingProvider, RoutingProvider};

#[wasm_bindgen(module = "/maplibre_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    fn init_map(container_id: &str);
    #[wasm_bindgen(js_name = renderRoute)]
    fn render_route_js(path: JsValue, bounds: JsValue);
    #[wasm_bindgen(js_name = renderControlPoints)]
    fn render_control_points_js(points: JsValue);
    #[wasm_bindgen(js_name = attachAutocomplete)]
    fn attach_autocomplete(input_id: &str, field: &str, options: JsValue);
    #[wasm_bindgen(js_name = downloadFile)]
    fn download_file(file_name: &str, base64: &str);
}

const MAP_CONTAINER_ID: &str = "route-map";
const START_INPUT_ID: &str = "start-location";
const END_INPUT_ID: &str = "end-location";

pub struct Model {
    page: Page,
    editor: RouteEditor,
    provider: Option<HttpRoutingProvider>,
    pending_route: bool,
    draft: TripDraft,
    saving: bool,
    recent_trips: Vec<Trip>,
    trips: Vec<Trip>,
    filter: TripFilter,
    current_trip: Option<Trip>,
    membership_pending: bool,
    notification: Option<Notification>,
    rider: Rider,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Page {
    Home,
    Create,
    Trips,
    TripDetail(u32),
    NotFound,
}

impl Page {
    fn from_path(path: &[String]) -> Self {
        match path {
            [] => Self::Home,
            [segment] if segment.is_empty() => Self::Home,
            [segment] if segment == "create" => Self::Create,
            [segment] if segment == "trips" => Self::Trips,
            [segment, id] if segment == "trips" => {
                id.parse().map(Self::TripDetail).unwrap_or(Self::NotFound)
            }
            _ => Self::NotFound,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Notification {
    kind: NotificationKind,
    text: String,
}

impl Notification {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            text: text.into(),
        }
    }
}

pub enum Msg {
    UrlChanged(subs::UrlChanged),
    MapReady,
    ProviderConnected(Result<HttpRoutingProvider, EditorError>),
    StartChanged(String),
    EndChanged(String),
    PlaceChanged(PlaceChangedPayload),
    TravelModeChanged(String),
    CalculateRoute,
    ControlPointDragged(ControlPointDragPayload),
    RouteResolved(RouteTicket, Result<DirectionsResponse, EditorError>),
    ClearRoute,
    NameChanged(String),
    DescriptionChanged(String),
    SaveTrip,
    TripCreated(Result<TripResponse, String>),
    RecentTripsFetched(Result<Vec<Trip>, String>),
    TripsFetched(Result<Vec<Trip>, String>),
    TripFetched(Result<Trip, String>),
    QueryChanged(String),
    DifficultyFilterChanged(String),
    JoinTrip(u32),
    LeaveTrip(u32),
    MembershipChanged(Result<TripResponse, String>),
    ExportGpx(u32),
    GpxExported(Result<GpxExport, String>),
    DismissNotification,
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct PlaceChangedPayload {
    field: String,
    #[serde(default)]
    name: Option<String>,
}

impl PlaceChangedPayload {
    fn endpoint_field(&self) -> Option<EndpointField> {
        match self.field.as_str() {
            "start" => Some(EndpointField::Start),
            "end" => Some(EndpointField::End),
            _ => None,
        }
    }
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct ControlPointDragPayload {
    id: String,
    lat: f64,
    lon: f64,
}

pub fn init(url: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders.subscribe(Msg::UrlChanged);
    orders.stream(streams::window_event(Ev::from("map-ready"), |_| Msg::MapReady));
    orders.stream(streams::window_event(Ev::from("place-changed"), |event| {
        let payload: PlaceChangedPayload = custom_event_detail(event)?;
        web_sys::console::debug_1(
            &format!("[frontend] place changed field={} name={:?}", payload.field, payload.name).into(),
        );
        Some(Msg::PlaceChanged(payload))
    }));
    orders.stream(streams::window_event(Ev::from("control-point-drag"), |event| {
        let payload: ControlPointDragPayload = custom_event_detail(event)?;
        web_sys::console::debug_1(
            &format!(
                "[frontend] control point {} dropped at lat={:.5} lon={:.5}",
                payload.id, payload.lat, payload.lon
            )
            .into(),
        );
        Some(Msg::ControlPointDragged(payload))
    }));

    let mut editor = RouteEditor::new(TravelMode::Bicycling);
    editor.on_route_change(render_route);

    let mut model = Model {
        page: Page::Home,
        editor,
        provider: None,
        pending_route: false,
        draft: TripDraft::default(),
        saving: false,
        recent_trips: Vec::new(),
        trips: Vec::new(),
        filter: TripFilter::default(),
        current_trip: None,
        membership_pending: false,
        notification: None,
        rider: Rider {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Guest Rider".into(),
        },
    };

    enter_page(Page::from_path(url.path()), &mut model, orders);
    model
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::UrlChanged(subs::UrlChanged(url)) => {
            enter_page(Page::from_path(url.path()), model, orders);
        }
        Msg::MapReady => {
            if let Ok(options) = to_value(&AutocompleteOptions::default()) {
                attach_autocomplete(START_INPUT_ID, "start", options.clone());
                attach_autocomplete(END_INPUT_ID, "end", options);
            }
            render_route(model.editor.path(), model.editor.bounds());
            render_control_points(model.editor.control_points());
        }
        Msg::ProviderConnected(Ok(provider)) => {
            web_sys::console::debug_1(&"[frontend] routing provider ready".into());
            model.provider = Some(provider);
        }
        Msg::ProviderConnected(Err(err)) => {
            web_sys::console::error_1(&format!("[frontend] {err}").into());
            model.editor.mark_unavailable(err.to_string());
        }
        Msg::StartChanged(text) => model.editor.set_start(text),
        Msg::EndChanged(text) => model.editor.set_end(text),
        Msg::PlaceChanged(payload) => {
            if let Some(field) = payload.endpoint_field() {
                let place = PlaceSelection { name: payload.name };
                model.editor.select_place(field, &place);
            }
        }
        Msg::TravelModeChanged(value) => {
            if let Some(mode) = parse_travel_mode(&value) {
                model.editor.set_travel_mode(mode);
            }
        }
        Msg::CalculateRoute => {
            if model.pending_route {
                return;
            }
            let Some(provider) = model.provider.clone() else {
                model.notification = Some(Notification::error(
                    "The routing service is still loading. Please try again in a moment.",
                ));
                return;
            };
            match model.editor.begin_route() {
                Ok(pending) => {
                    model.pending_route = true;
                    orders.perform_cmd(resolve_route(provider, pending));
                }
                Err(err) => model.notification = Some(Notification::error(err.to_string())),
            }
        }
        Msg::ControlPointDragged(payload) => {
            let position = Coordinate::new(payload.lat, payload.lon);
            match model.editor.drag_control_point(&payload.id, position) {
                Ok(Some(pending)) => match model.provider.clone() {
                    Some(provider) => {
                        model.pending_route = true;
                        orders.perform_cmd(resolve_route(provider, pending));
                    }
                    None => render_control_points(model.editor.control_points()),
                },
                Ok(None) => render_control_points(model.editor.control_points()),
                Err(err) => model.notification = Some(Notification::error(err.to_string())),
            }
        }
        Msg::RouteResolved(ticket, result) => {
            match model.editor.apply_route(ticket, result) {
                Ok(RouteOutcome::Applied { kind, points }) => {
                    model.pending_route = false;
                    web_sys::console::debug_1(
                        &format!("[frontend] route applied kind={kind:?} points={points}").into(),
                    );
                    render_control_points(model.editor.control_points());
                    if kind == RequestKind::Initial {
                        model.notification = Some(Notification::success("Route created successfully!"));
                    }
                }
                Ok(RouteOutcome::Stale) => {
                    web_sys::console::debug_1(
                        &format!(
                            "[frontend] dropped stale route response generation={}",
                            ticket.generation()
                        )
                        .into(),
                    );
                }
                Err(err) => {
                    model.pending_route = false;
                    web_sys::console::error_1(&format!("[frontend] route failed: {err}").into());
                    // The dropped handle keeps its new position even though the route did not move.
                    render_control_points(model.editor.control_points());
                    let text = match (ticket.kind(), &err) {
                        (RequestKind::Waypoints, EditorError::RouteNotFound(_)) => {
                            "Could not update route with new waypoint".to_string()
                        }
                        _ => err.to_string(),
                    };
                    model.notification = Some(Notification::error(text));
                }
            }
        }
        Msg::ClearRoute => {
            model.editor.clear();
            model.pending_route = false;
            render_control_points(&[]);
        }
        Msg::NameChanged(name) => model.draft.name = name,
        Msg::DescriptionChanged(description) => model.draft.description = description,
        Msg::SaveTrip => {
            if model.saving {
                return;
            }
            match model.draft.finalize(model.editor.path()) {
                Ok(request) => {
                    model.saving = true;
                    web_sys::console::debug_1(
                        &format!(
                            "[frontend] saving trip name={} points={}",
                            request.name,
                            request.route.len()
                        )
                        .into(),
                    );
                    orders.perform_cmd(async move { Msg::TripCreated(api::create_trip(request).await) });
                }
                Err(err) => model.notification = Some(Notification::error(err.to_string())),
            }
        }
        Msg::TripCreated(Ok(response)) => {
            model.saving = false;
            model.draft.reset();
            model.editor.clear();
            render_control_points(&[]);
            model.notification = Some(Notification::success(
                response
                    .message
                    .unwrap_or_else(|| "Trip created successfully".into()),
            ));
            orders.request_url(
                Url::new().set_path(["trips".to_string(), response.trip.id.to_string()]),
            );
        }
        Msg::TripCreated(Err(err)) => {
            model.saving = false;
            model.notification = Some(Notification::error(format!("Failed to create trip: {err}")));
        }
        Msg::RecentTripsFetched(Ok(trips)) => model.recent_trips = trips,
        Msg::TripsFetched(Ok(trips)) => model.trips = trips,
        Msg::RecentTripsFetched(Err(err)) | Msg::TripsFetched(Err(err)) => {
            web_sys::console::error_1(&format!("[frontend] failed to load trips: {err}").into());
            model.notification = Some(Notification::error("Failed to load trips"));
        }
        Msg::TripFetched(Ok(trip)) => model.current_trip = Some(trip),
        Msg::TripFetched(Err(err)) => {
            web_sys::console::error_1(&format!("[frontend] failed to load trip: {err}").into());
            model.notification = Some(Notification::error("Failed to load trip details"));
        }
        Msg::QueryChanged(query) => model.filter.query = query,
        Msg::DifficultyFilterChanged(value) => model.filter.difficulty = parse_difficulty(&value),
        Msg::JoinTrip(trip_id) => {
            if model.membership_pending {
                return;
            }
            model.membership_pending = true;
            let rider = model.rider.clone();
            orders.perform_cmd(async move {
                Msg::MembershipChanged(api::join_trip(trip_id, rider).await)
            });
        }
        Msg::LeaveTrip(trip_id) => {
            if model.membership_pending {
                return;
            }
            model.membership_pending = true;
            let rider_id = model.rider.id.clone();
            orders.perform_cmd(async move {
                Msg::MembershipChanged(api::leave_trip(trip_id, rider_id).await)
            });
        }
        Msg::MembershipChanged(result) => {
            model.membership_pending = false;
            match result {
                Ok(response) => {
                    if let Some(message) = response.message {
                        model.notification = Some(Notification::success(message));
                    }
                    model.current_trip = Some(response.trip);
                }
                Err(err) => model.notification = Some(Notification::error(err)),
            }
        }
        Msg::ExportGpx(trip_id) => {
            orders.perform_cmd(async move { Msg::GpxExported(api::export_gpx(trip_id).await) });
        }
        Msg::GpxExported(Ok(export)) => download_file(&export.file_name, &export.gpx_base64),
        Msg::GpxExported(Err(err)) => {
            model.notification = Some(Notification::error(format!("GPX export failed: {err}")));
        }
        Msg::DismissNotification => model.notification = None,
    }
}

fn enter_page(page: Page, model: &mut Model, orders: &mut impl Orders<Msg>) {
    web_sys::console::debug_1(&format!("[frontend] page {page:?}").into());
    model.page = page;
    match page {
        Page::Home => {
            orders.perform_cmd(async { Msg::RecentTripsFetched(api::fetch_recent_trips().await) });
        }
        Page::Create => {
            orders.perform_cmd(async { Msg::RecentTripsFetched(api::fetch_recent_trips().await) });
            if model.provider.is_none() && !model.editor.is_unavailable() {
                orders.perform_cmd(async {
                    Msg::ProviderConnected(HttpRoutingProvider::connect(&api::api_root()).await)
                });
            }
            if !model.editor.is_unavailable() {
                orders.after_next_render(|_| init_map(MAP_CONTAINER_ID));
            }
        }
        Page::Trips => {
            orders.perform_cmd(async { Msg::TripsFetched(api::fetch_trips().await) });
        }
        Page::TripDetail(id) => {
            if model.current_trip.as_ref().is_none_or(|trip| trip.id != id) {
                model.current_trip = None;
            }
            orders.perform_cmd(async move { Msg::TripFetched(api::fetch_trip(id).await) });
        }
        Page::NotFound => {}
    }
}

async fn resolve_route(provider: HttpRoutingProvider, pending: PendingRoute) -> Msg {
    let PendingRoute { ticket, request } = pending;
    web_sys::console::debug_1(
        &format!(
            "[frontend] requesting route origin={:?} destination={:?} waypoints={}",
            request.origin,
            request.destination,
            request.waypoints.len()
        )
        .into(),
    );
    Msg::RouteResolved(ticket, provider.resolve_route(request).await)
}

pub fn view(model: &Model) -> Node<Msg> {
    let content = match model.page {
        Page::Home => view_home(model),
        Page::Create => view_create(model),
        Page::Trips => view_trips(model),
        Page::TripDetail(id) => view_trip_detail(model, id),
        Page::NotFound => view_not_found(),
    };

    div![
        C!["app-container"],
        view_nav(model.page),
        content,
        view_notification(model.notification.as_ref()),
    ]
}

fn view_nav(page: Page) -> Node<Msg> {
    let link = |href: &str, label: &str, active: bool| {
        a![
            C![IF!(active => "active")],
            attrs! { At::Href => href },
            label
        ]
    };

    nav![
        C!["navbar"],
        a![C!["brand"], attrs! { At::Href => "/" }, "Bike Trip Planner"],
        link("/trips", "Find Trips", matches!(page, Page::Trips | Page::TripDetail(_))),
        link("/create", "Create Trip", page == Page::Create),
    ]
}

fn view_home(model: &Model) -> Node<Msg> {
    div![
        C!["home"],
        section![
            C!["hero"],
            h1!["Plan your next ride together"],
            p!["Draw a route on the map, share it as a trip and see who is riding along."],
            a![C!["button"], attrs! { At::Href => "/create" }, "Create a Trip"],
            a![C!["button", "secondary"], attrs! { At::Href => "/trips" }, "Browse Trips"],
        ],
        section![
            C!["recent-trips"],
            h2!["Recent Trips"],
            view_trip_cards(model.recent_trips.iter()),
        ],
    ]
}

fn view_create(model: &Model) -> Node<Msg> {
    div![
        C!["create-trip"],
        div![C!["editor-column"], view_editor(model), view_trip_form(model)],
        aside![
            C!["sidebar"],
            h2!["Recent Trips"],
            view_trip_cards(model.recent_trips.iter()),
        ],
    ]
}

fn view_editor(model: &Model) -> Node<Msg> {
    if let Some(reason) = model.editor.unavailable_reason() {
        return div![
            C!["editor-unavailable"],
            h3!["Map unavailable"],
            p!["The routing service could not be loaded. Route editing is disabled."],
            small![reason],
        ];
    }

    let endpoints = model.editor.endpoints();
    let mode = model.editor.travel_mode();
    let mode_option = |value: TravelMode, label: &str| {
        option![
            attrs! {
                At::Value => travel_mode_value(value),
                At::Selected => bool_attr(mode == value),
            },
            label
        ]
    };

    div![
        C!["route-editor"],
        div![
            C!["endpoints"],
            div![
                C!["input-field"],
                label![attrs! { At::For => START_INPUT_ID }, "Start location"],
                input![
                    attrs! {
                        At::Id => START_INPUT_ID,
                        At::Value => &endpoints.start,
                        At::Placeholder => "Enter start address",
                        At::AutoComplete => "off",
                    },
                    input_ev(Ev::Input, Msg::StartChanged),
                ],
            ],
            div![
                C!["input-field"],
                label![attrs! { At::For => END_INPUT_ID }, "End location"],
                input![
                    attrs! {
                        At::Id => END_INPUT_ID,
                        At::Value => &endpoints.end,
                        At::Placeholder => "Enter destination",
                        At::AutoComplete => "off",
                    },
                    input_ev(Ev::Input, Msg::EndChanged),
                ],
            ],
            select![
                C!["travel-mode"],
                mode_option(TravelMode::Bicycling, "Bicycling"),
                mode_option(TravelMode::Walking, "Walking"),
                mode_option(TravelMode::Driving, "Driving"),
                input_ev(Ev::Change, Msg::TravelModeChanged),
            ],
            button![
                if model.pending_route { "Calculating..." } else { "Calculate Route" },
                attrs! { At::Disabled => bool_attr(model.pending_route) },
                ev(Ev::Click, |event| {
                    event.prevent_default();
                    Msg::CalculateRoute
                }),
            ],
            IF!(model.editor.has_route() => button![
                C!["secondary"],
                "Clear",
                ev(Ev::Click, |event| {
                    event.prevent_default();
                    Msg::ClearRoute
                }),
            ]),
        ],
        div![C!["map"], attrs! { At::Id => MAP_CONTAINER_ID }],
        IF!(!model.editor.control_points().is_empty() =>
            small!["Drag the blue markers to reshape the route."]),
        view_stats(model),
    ]
}

fn view_stats(model: &Model) -> Node<Msg> {
    let stats = model.editor.stats();
    let card = |label: &str, content: String| {
        div![
            C!["metadata-card"],
            span![C!["label"], label],
            strong![content],
        ]
    };

    div![
        C!["metadata-grid"],
        card("Distance", stats.distance_label()),
        card("Duration", stats.duration_label()),
        card("Elevation", stats.elevation_label()),
        card("Difficulty", stats.difficulty_label().to_string()),
    ]
}

fn view_trip_form(model: &Model) -> Node<Msg> {
    form![
        C!["trip-form"],
        h2!["Trip details"],
        div![
            C!["input-field"],
            label!["Trip name"],
            input![
                attrs! {
                    At::Value => &model.draft.name,
                    At::Placeholder => "Sunday morning ride",
                },
                input_ev(Ev::Input, Msg::NameChanged),
            ],
        ],
        div![
            C!["input-field"],
            label!["Description"],
            textarea![
                attrs! { At::Value => &model.draft.description, At::Rows => 3 },
                input_ev(Ev::Input, Msg::DescriptionChanged),
            ],
        ],
        button![
            if model.saving { "Saving..." } else { "Create Trip" },
            attrs! { At::Disabled => bool_attr(model.saving) },
            ev(Ev::Click, |event| {
                event.prevent_default();
                Msg::SaveTrip
            }),
        ],
    ]
}

fn view_trips(model: &Model) -> Node<Msg> {
    let selected = model.filter.difficulty.map(|d| d.as_str()).unwrap_or("");
    let difficulty_option = |value: &str, label: &str| {
        option![
            attrs! {
                At::Value => value,
                At::Selected => bool_attr(selected == value),
            },
            label
        ]
    };
    let matching = model.filter.apply(&model.trips);

    div![
        C!["trips"],
        h1!["Find Trips"],
        div![
            C!["filters"],
            input![
                attrs! {
                    At::Value => &model.filter.query,
                    At::Placeholder => "Search trips",
                },
                input_ev(Ev::Input, Msg::QueryChanged),
            ],
            select![
                difficulty_option("", "All difficulties"),
                difficulty_option("Easy", "Easy"),
                difficulty_option("Moderate", "Moderate"),
                difficulty_option("Hard", "Hard"),
                input_ev(Ev::Change, Msg::DifficultyFilterChanged),
            ],
        ],
        if matching.is_empty() {
            p![C!["empty"], "No trips match your search."]
        } else {
            view_trip_cards(matching.into_iter())
        },
    ]
}

fn view_trip_cards<'a>(trips: impl Iterator<Item = &'a Trip>) -> Node<Msg> {
    div![C!["trip-grid"], trips.map(view_trip_card)]
}

fn view_trip_card(trip: &Trip) -> Node<Msg> {
    a![
        C!["trip-card"],
        attrs! { At::Href => format!("/trips/{}", trip.id) },
        img![attrs! { At::Src => &trip.preview_image_url, At::Alt => &trip.name }],
        h3![&trip.name],
        span![C!["difficulty", trip.difficulty.as_str().to_lowercase()], trip.difficulty.as_str()],
        p![format!("{} · {}", trip.distance, trip.duration)],
    ]
}

fn view_trip_detail(model: &Model, id: u32) -> Node<Msg> {
    let Some(trip) = model.current_trip.as_ref().filter(|trip| trip.id == id) else {
        return div![C!["trip-detail"], p!["Loading trip..."]];
    };
    let joined = trip.has_rider(&model.rider.id);
    let riders = trip.joined_users.len();

    div![
        C!["trip-detail"],
        a![attrs! { At::Href => "/trips" }, "← Back to trips"],
        img![attrs! { At::Src => &trip.preview_image_url, At::Alt => &trip.name }],
        h1![&trip.name],
        p![&trip.description],
        div![
            C!["metadata-grid"],
            div![C!["metadata-card"], span![C!["label"], "Distance"], strong![&trip.distance]],
            div![C!["metadata-card"], span![C!["label"], "Duration"], strong![&trip.duration]],
            div![C!["metadata-card"], span![C!["label"], "Difficulty"], strong![trip.difficulty.as_str()]],
            div![
                C!["metadata-card"],
                span![C!["label"], "Created"],
                strong![trip.created_at.format("%b %-d, %Y").to_string()]
            ],
        ],
        h2![format!("{riders} {}", if riders == 1 { "rider" } else { "riders" })],
        if trip.joined_users.is_empty() {
            p!["No riders yet. Be the first to join!"]
        } else {
            ul![trip.joined_users.iter().map(|rider| li![&rider.name])]
        },
        button![
            if joined { "Leave Trip" } else { "Join Trip" },
            C![IF!(joined => "secondary")],
            attrs! { At::Disabled => bool_attr(model.membership_pending) },
            ev(Ev::Click, move |_| if joined { Msg::LeaveTrip(id) } else { Msg::JoinTrip(id) }),
        ],
        button![C!["secondary"], "Download GPX", ev(Ev::Click, move |_| Msg::ExportGpx(id))],
    ]
}

fn view_not_found() -> Node<Msg> {
    div![
        C!["not-found"],
        h1!["404"],
        p!["Oops! Page not found"],
        a![attrs! { At::Href => "/" }, "Return to Home"],
    ]
}

fn view_notification(notification: Option<&Notification>) -> Node<Msg> {
    let Some(notification) = notification else {
        return empty![];
    };
    let class = match notification.kind {
        NotificationKind::Success => "success",
        NotificationKind::Error => "error",
    };

    div![
        C!["toast", class],
        span![&notification.text],
        button!["×", ev(Ev::Click, |_| Msg::DismissNotification)],
    ]
}

#[wasm_bindgen(start)]
pub fn start() {
    App::start("app", init, update, view);
}

fn render_route(path: &[Coordinate], bounds: Option<RouteBounds>) {
    let bounds = bounds
        .and_then(|b| to_value(&b).ok())
        .unwrap_or(JsValue::NULL);
    if let Ok(value) = to_value(path) {
        render_route_js(value, bounds);
    }
}

fn render_control_points(points: &[ControlPoint]) {
    if let Ok(value) = to_value(points) {
        render_control_points_js(value);
    }
}

fn custom_event_detail<T: for<'de> Deserialize<'de>>(event: web_sys::Event) -> Option<T> {
    let event = event.dyn_into::<web_sys::CustomEvent>().ok()?;
    serde_wasm_bindgen::from_value(event.detail()).ok()
}

fn parse_travel_mode(value: &str) -> Option<TravelMode> {
    match value {
        "BICYCLING" => Some(TravelMode::Bicycling),
        "WALKING" => Some(TravelMode::Walking),
        "DRIVING" => Some(TravelMode::Driving),
        _ => None,
    }
}

fn travel_mode_value(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Bicycling => "BICYCLING",
        TravelMode::Walking => "WALKING",
        TravelMode::Driving => "DRIVING",
    }
}

fn bool_attr(value: bool) -> AtValue {
    if value {
        AtValue::Some("true".into())
    } else {
        AtValue::Ignored
    }
}

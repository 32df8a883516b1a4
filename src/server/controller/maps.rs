use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::api::ApiResponse,
    server::{
        error::AppError, middleware::auth::AuthGuard, service::maps::MapsService,
        state::AppState,
    },
};

/// Tag for grouping maps endpoints in OpenAPI documentation
pub static MAPS_TAG: &str = "maps";

#[derive(Deserialize)]
pub struct GeocodeParams {
    pub address: String,
}

#[derive(Deserialize)]
pub struct ReverseGeocodeParams {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize)]
pub struct DirectionsParams {
    pub origin: String,
    pub destination: String,
}

#[derive(Deserialize)]
pub struct DistanceMatrixParams {
    pub origins: String,
    pub destinations: String,
}

#[derive(Deserialize)]
pub struct NearbyParams {
    pub location: String,
    #[serde(default = "default_radius")]
    pub radius: u32,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

fn default_radius() -> u32 {
    1500
}

fn default_kind() -> String {
    "tourist_attraction".to_string()
}

/// Geocode a free-form address.
#[utoipa::path(
    get,
    path = "/api/maps/geocode",
    tag = MAPS_TAG,
    params(("address" = String, Query, description = "Address to geocode")),
    responses(
        (status = 200, description = "Geocoding result"),
        (status = 502, description = "Upstream maps API unavailable")
    ),
)]
pub async fn geocode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<GeocodeParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let result = MapsService::new(&state.http_client, &state.maps_api_key)
        .geocode(&params.address)
        .await?;

    Ok(Json(ApiResponse::success("Geocoding result", result)))
}

/// Reverse-geocode coordinates to an address.
#[utoipa::path(
    get,
    path = "/api/maps/reverse-geocode",
    tag = MAPS_TAG,
    params(
        ("lat" = f64, Query, description = "Latitude"),
        ("lng" = f64, Query, description = "Longitude")
    ),
    responses((status = 200, description = "Reverse geocoding result")),
)]
pub async fn reverse_geocode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ReverseGeocodeParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let result = MapsService::new(&state.http_client, &state.maps_api_key)
        .reverse_geocode(params.lat, params.lng)
        .await?;

    Ok(Json(ApiResponse::success("Reverse geocoding result", result)))
}

/// Directions between two places, trimmed to the first route's summary.
#[utoipa::path(
    get,
    path = "/api/maps/directions",
    tag = MAPS_TAG,
    params(
        ("origin" = String, Query, description = "Origin address or place"),
        ("destination" = String, Query, description = "Destination address or place")
    ),
    responses(
        (status = 200, description = "Directions"),
        (status = 404, description = "No route found")
    ),
)]
pub async fn directions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<DirectionsParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let result = MapsService::new(&state.http_client, &state.maps_api_key)
        .directions(&params.origin, &params.destination)
        .await?;

    Ok(Json(ApiResponse::success("Directions", result)))
}

/// Travel distance and duration between origin and destination sets.
#[utoipa::path(
    get,
    path = "/api/maps/distance-matrix",
    tag = MAPS_TAG,
    params(
        ("origins" = String, Query, description = "Pipe-separated origins"),
        ("destinations" = String, Query, description = "Pipe-separated destinations")
    ),
    responses((status = 200, description = "Distance matrix")),
)]
pub async fn distance_matrix(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<DistanceMatrixParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let result = MapsService::new(&state.http_client, &state.maps_api_key)
        .distance_matrix(&params.origins, &params.destinations)
        .await?;

    Ok(Json(ApiResponse::success("Distance matrix", result)))
}

/// Nearby places around a location.
#[utoipa::path(
    get,
    path = "/api/maps/nearby",
    tag = MAPS_TAG,
    params(
        ("location" = String, Query, description = "lat,lng"),
        ("radius" = Option<u32>, Query, description = "Search radius in meters (default: 1500)"),
        ("type" = Option<String>, Query, description = "Place type (default: tourist_attraction)")
    ),
    responses((status = 200, description = "Nearby places")),
)]
pub async fn nearby(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<NearbyParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let result = MapsService::new(&state.http_client, &state.maps_api_key)
        .nearby(&params.location, params.radius, &params.kind)
        .await?;

    Ok(Json(ApiResponse::success("Nearby places", result)))
}

/// Details for a single place.
#[utoipa::path(
    get,
    path = "/api/maps/place/{place_id}",
    tag = MAPS_TAG,
    params(("place_id" = String, Path, description = "Place id")),
    responses(
        (status = 200, description = "Place details"),
        (status = 404, description = "Place not found")
    ),
)]
pub async fn place_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(place_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let result = MapsService::new(&state.http_client, &state.maps_api_key)
        .place_details(&place_id)
        .await?;

    Ok(Json(ApiResponse::success("Place details", result)))
}

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::api::ApiResponse,
    server::{error::AppError, service::weather::WeatherService, state::AppState},
};

/// Tag for grouping weather endpoints in OpenAPI documentation
pub static WEATHER_TAG: &str = "weather";

#[derive(Deserialize)]
pub struct CurrentWeatherParams {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
pub struct CityWeatherParams {
    pub city: String,
}

/// Current weather by coordinates. Public, metric units.
#[utoipa::path(
    get,
    path = "/api/weather/current",
    tag = WEATHER_TAG,
    params(
        ("lat" = f64, Query, description = "Latitude"),
        ("lon" = f64, Query, description = "Longitude")
    ),
    responses(
        (status = 200, description = "Current weather"),
        (status = 502, description = "Upstream weather API unavailable")
    ),
)]
pub async fn current(
    State(state): State<AppState>,
    Query(params): Query<CurrentWeatherParams>,
) -> Result<impl IntoResponse, AppError> {
    let result = WeatherService::new(&state.http_client, &state.weather_api_key)
        .current(params.lat, params.lon)
        .await?;

    Ok(Json(ApiResponse::success("Current weather", result)))
}

/// Current weather by city name. Public, metric units.
#[utoipa::path(
    get,
    path = "/api/weather/by-city",
    tag = WEATHER_TAG,
    params(("city" = String, Query, description = "City name")),
    responses(
        (status = 200, description = "Current weather"),
        (status = 502, description = "Upstream weather API unavailable")
    ),
)]
pub async fn by_city(
    State(state): State<AppState>,
    Query(params): Query<CityWeatherParams>,
) -> Result<impl IntoResponse, AppError> {
    let result = WeatherService::new(&state.http_client, &state.weather_api_key)
        .by_city(&params.city)
        .await?;

    Ok(Json(ApiResponse::success("Current weather", result)))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WaypointDto {
    pub lat: f64,
    pub lng: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SaveRouteDto {
    pub name: String,
    pub description: Option<String>,
    pub waypoints: Vec<WaypointDto>,
    pub distance_km: f64,
    pub duration_minutes: i32,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RouteDto {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub waypoints: Vec<WaypointDto>,
    pub distance_km: f64,
    pub duration_minutes: i32,
    pub is_public: bool,
    pub share_token: Option<String>,
    pub shared_with: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShareRouteDto {
    pub user_ids: Vec<i32>,
}

/// Share link as returned by the mint endpoint; `url` is the public path the
/// frontend can hand out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShareLinkDto {
    pub share_token: String,
    pub url: String,
}

/// Aggregate totals over the caller's own routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RouteStatisticsDto {
    pub total_routes: u64,
    pub total_distance_km: f64,
    pub total_duration_minutes: i64,
}

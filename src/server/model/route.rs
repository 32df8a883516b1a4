//! Route domain models and parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::route::{RouteDto, RouteStatisticsDto, SaveRouteDto, WaypointDto},
    server::error::AppError,
};

/// A single point of a route's geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lng: f64,
    pub label: Option<String>,
}

impl Waypoint {
    pub fn from_dto(dto: WaypointDto) -> Self {
        Self {
            lat: dto.lat,
            lng: dto.lng,
            label: dto.label,
        }
    }

    pub fn into_dto(self) -> WaypointDto {
        WaypointDto {
            lat: self.lat,
            lng: self.lng,
            label: self.label,
        }
    }
}

/// Route owned by a user, with the waypoint payload already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub waypoints: Vec<Waypoint>,
    pub distance_km: f64,
    pub duration_minutes: i32,
    pub is_public: bool,
    pub share_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Route {
    /// Converts an entity model, parsing the serialized waypoint payload.
    ///
    /// # Returns
    /// - `Ok(Route)` - Converted domain model
    /// - `Err(AppError::InternalError)` - Stored waypoint JSON was corrupt
    pub fn from_entity(entity: entity::route::Model) -> Result<Self, AppError> {
        let waypoints: Vec<Waypoint> = serde_json::from_str(&entity.waypoints).map_err(|e| {
            AppError::InternalError(format!(
                "Corrupt waypoint payload for route {}: {}",
                entity.id, e
            ))
        })?;

        Ok(Self {
            id: entity.id,
            owner_id: entity.owner_id,
            name: entity.name,
            description: entity.description,
            waypoints,
            distance_km: entity.distance_km,
            duration_minutes: entity.duration_minutes,
            is_public: entity.is_public,
            share_token: entity.share_token,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Converts to the wire DTO together with the ids the route is shared
    /// with.
    pub fn into_dto(self, shared_with: Vec<i32>) -> RouteDto {
        RouteDto {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            description: self.description,
            waypoints: self.waypoints.into_iter().map(|w| w.into_dto()).collect(),
            distance_km: self.distance_km,
            duration_minutes: self.duration_minutes,
            is_public: self.is_public,
            share_token: self.share_token,
            shared_with,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Parameters for creating or fully updating a route.
#[derive(Debug, Clone)]
pub struct SaveRouteParams {
    pub name: String,
    pub description: Option<String>,
    pub waypoints: Vec<Waypoint>,
    pub distance_km: f64,
    pub duration_minutes: i32,
    pub is_public: bool,
}

impl SaveRouteParams {
    pub fn from_dto(dto: SaveRouteDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            waypoints: dto.waypoints.into_iter().map(Waypoint::from_dto).collect(),
            distance_km: dto.distance_km,
            duration_minutes: dto.duration_minutes,
            is_public: dto.is_public.unwrap_or(false),
        }
    }

    /// Serializes the waypoint payload for storage.
    pub fn waypoints_json(&self) -> Result<String, AppError> {
        serde_json::to_string(&self.waypoints)
            .map_err(|e| AppError::BadRequest(format!("Invalid waypoints data: {}", e)))
    }
}

/// Aggregate totals over one owner's routes.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStatistics {
    pub total_routes: u64,
    pub total_distance_km: f64,
    pub total_duration_minutes: i64,
}

impl RouteStatistics {
    pub fn into_dto(self) -> RouteStatisticsDto {
        RouteStatisticsDto {
            total_routes: self.total_routes,
            total_distance_km: self.total_distance_km,
            total_duration_minutes: self.total_duration_minutes,
        }
    }
}

//! Route factory plus a share helper.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Default two-point waypoint payload used when a test does not care about
/// the geometry.
pub const DEFAULT_WAYPOINTS: &str =
    r#"[{"lat":41.0082,"lng":28.9784,"label":"Start"},{"lat":39.9334,"lng":32.8597,"label":"End"}]"#;

/// Factory for creating routes owned by a test user.
pub struct RouteFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    name: String,
    description: Option<String>,
    waypoints: String,
    distance_km: f64,
    duration_minutes: i32,
    is_public: bool,
    share_token: Option<String>,
}

impl<'a> RouteFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, owner_id: i32) -> Self {
        Self {
            db,
            owner_id,
            name: format!("Route {}", next_id()),
            description: None,
            waypoints: DEFAULT_WAYPOINTS.to_string(),
            distance_km: 12.5,
            duration_minutes: 42,
            is_public: false,
            share_token: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn waypoints(mut self, waypoints: impl Into<String>) -> Self {
        self.waypoints = waypoints.into();
        self
    }

    pub fn distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = distance_km;
        self
    }

    pub fn duration_minutes(mut self, duration_minutes: i32) -> Self {
        self.duration_minutes = duration_minutes;
        self
    }

    pub fn is_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn share_token(mut self, share_token: impl Into<String>) -> Self {
        self.share_token = Some(share_token.into());
        self
    }

    /// Builds and inserts the route row.
    pub async fn build(self) -> Result<entity::route::Model, DbErr> {
        let now = Utc::now();
        entity::route::ActiveModel {
            owner_id: ActiveValue::Set(self.owner_id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            waypoints: ActiveValue::Set(self.waypoints),
            distance_km: ActiveValue::Set(self.distance_km),
            duration_minutes: ActiveValue::Set(self.duration_minutes),
            is_public: ActiveValue::Set(self.is_public),
            share_token: ActiveValue::Set(self.share_token),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Inserts a share row granting `user_id` access to `route_id`.
pub async fn share_with(
    db: &DatabaseConnection,
    route_id: i32,
    user_id: i32,
) -> Result<entity::route_share::Model, DbErr> {
    entity::route_share::ActiveModel {
        route_id: ActiveValue::Set(route_id),
        user_id: ActiveValue::Set(user_id),
        shared_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

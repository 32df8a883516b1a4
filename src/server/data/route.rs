//! Route data repository for database operations.
//!
//! This module provides the `RouteRepository` for route records, the
//! shared-with set and the share-token lookup that backs unauthenticated
//! public reads.

use chrono::Utc;
use sea_orm::{
    sea_query::Func, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::route::{Route, SaveRouteParams},
};

/// Repository providing database operations for routes and route shares.
pub struct RouteRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RouteRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a new route owned by `owner_id`.
    ///
    /// # Returns
    /// - `Ok(Route)` - The created route with generated id
    /// - `Err(AppError)` - Waypoint serialization or insert failure
    pub async fn create(&self, owner_id: i32, param: SaveRouteParams) -> Result<Route, AppError> {
        let waypoints_json = param.waypoints_json()?;
        let now = Utc::now();

        let entity = entity::route::ActiveModel {
            owner_id: ActiveValue::Set(owner_id),
            name: ActiveValue::Set(param.name),
            description: ActiveValue::Set(param.description),
            waypoints: ActiveValue::Set(waypoints_json),
            distance_km: ActiveValue::Set(param.distance_km),
            duration_minutes: ActiveValue::Set(param.duration_minutes),
            is_public: ActiveValue::Set(param.is_public),
            share_token: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Route::from_entity(entity)
    }

    /// Finds a route by primary key.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Route>, AppError> {
        let entity = entity::prelude::Route::find_by_id(id).one(self.db).await?;

        entity.map(Route::from_entity).transpose()
    }

    /// Routes owned by `owner_id`, newest first.
    pub async fn for_owner(&self, owner_id: i32) -> Result<Vec<Route>, AppError> {
        let entities = entity::prelude::Route::find()
            .filter(entity::route::Column::OwnerId.eq(owner_id))
            .order_by_desc(entity::route::Column::CreatedAt)
            .all(self.db)
            .await?;

        entities.into_iter().map(Route::from_entity).collect()
    }

    /// Case-insensitive name search within one owner's routes, newest first.
    pub async fn search_by_name(&self, owner_id: i32, query: &str) -> Result<Vec<Route>, AppError> {
        let pattern = format!("%{}%", query.to_lowercase());

        let entities = entity::prelude::Route::find()
            .filter(entity::route::Column::OwnerId.eq(owner_id))
            .filter(
                sea_orm::sea_query::Expr::expr(Func::lower(sea_orm::sea_query::Expr::col(
                    entity::route::Column::Name,
                )))
                .like(&pattern),
            )
            .order_by_desc(entity::route::Column::CreatedAt)
            .all(self.db)
            .await?;

        entities.into_iter().map(Route::from_entity).collect()
    }

    /// Routes other users have shared with `user_id`, newest first.
    pub async fn shared_with_user(&self, user_id: i32) -> Result<Vec<Route>, AppError> {
        let shares = entity::prelude::RouteShare::find()
            .filter(entity::route_share::Column::UserId.eq(user_id))
            .all(self.db)
            .await?;

        let route_ids: Vec<i32> = shares.into_iter().map(|s| s.route_id).collect();
        if route_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Route::find()
            .filter(entity::route::Column::Id.is_in(route_ids))
            .order_by_desc(entity::route::Column::CreatedAt)
            .all(self.db)
            .await?;

        entities.into_iter().map(Route::from_entity).collect()
    }

    /// Finds a route by its share token.
    pub async fn find_by_share_token(&self, token: &str) -> Result<Option<Route>, AppError> {
        let entity = entity::prelude::Route::find()
            .filter(entity::route::Column::ShareToken.eq(token))
            .one(self.db)
            .await?;

        entity.map(Route::from_entity).transpose()
    }

    /// Rewrites a route's content fields, refreshing the updated timestamp.
    ///
    /// # Returns
    /// - `Ok(Route)` - The updated route
    /// - `Err(AppError::NotFound)` - No route with that id
    pub async fn update(&self, id: i32, param: SaveRouteParams) -> Result<Route, AppError> {
        let waypoints_json = param.waypoints_json()?;

        let entity = entity::prelude::Route::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        let mut active_model: entity::route::ActiveModel = entity.into();
        active_model.name = ActiveValue::Set(param.name);
        active_model.description = ActiveValue::Set(param.description);
        active_model.waypoints = ActiveValue::Set(waypoints_json);
        active_model.distance_km = ActiveValue::Set(param.distance_km);
        active_model.duration_minutes = ActiveValue::Set(param.duration_minutes);
        active_model.is_public = ActiveValue::Set(param.is_public);
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        Route::from_entity(entity)
    }

    /// Sets or clears the share token.
    pub async fn set_share_token(
        &self,
        id: i32,
        token: Option<String>,
    ) -> Result<Route, AppError> {
        let entity = entity::prelude::Route::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        let mut active_model: entity::route::ActiveModel = entity.into();
        active_model.share_token = ActiveValue::Set(token);

        let entity = active_model.update(self.db).await?;

        Route::from_entity(entity)
    }

    /// Deletes a route by id. Share rows are removed by the service first.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Route::delete_by_id(id).exec(self.db).await?;

        Ok(())
    }

    // ---- shares ----

    /// Checks whether the route is already shared with the user.
    pub async fn is_shared_with(&self, route_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::RouteShare::find()
            .filter(entity::route_share::Column::RouteId.eq(route_id))
            .filter(entity::route_share::Column::UserId.eq(user_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Inserts a share row.
    pub async fn add_share(&self, route_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::route_share::ActiveModel {
            route_id: ActiveValue::Set(route_id),
            user_id: ActiveValue::Set(user_id),
            shared_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Removes a share row; succeeds whether or not the row existed.
    pub async fn remove_share(&self, route_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::RouteShare::delete_many()
            .filter(entity::route_share::Column::RouteId.eq(route_id))
            .filter(entity::route_share::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Ids of the users the route is shared with.
    pub async fn shared_user_ids(&self, route_id: i32) -> Result<Vec<i32>, DbErr> {
        let shares = entity::prelude::RouteShare::find()
            .filter(entity::route_share::Column::RouteId.eq(route_id))
            .order_by_asc(entity::route_share::Column::SharedAt)
            .all(self.db)
            .await?;

        Ok(shares.into_iter().map(|s| s.user_id).collect())
    }

    /// Removes every share row of the route.
    pub async fn remove_shares_for_route(&self, route_id: i32) -> Result<(), DbErr> {
        entity::prelude::RouteShare::delete_many()
            .filter(entity::route_share::Column::RouteId.eq(route_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Removes the user's incoming shares and deletes their owned routes'
    /// rows. Used during account removal.
    pub async fn remove_shares_for_user(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::RouteShare::delete_many()
            .filter(entity::route_share::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}

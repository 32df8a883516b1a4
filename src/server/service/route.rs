//! Route rules: ownership, the shared-with set and share-token lifecycle.
//!
//! Only the owner may mutate, share, unshare or revoke; anyone holding a
//! valid share token may read regardless of ownership or the public flag.

use rand::{distr::Alphanumeric, Rng};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{route::RouteRepository, user::UserRepository},
    error::AppError,
    model::route::{Route, RouteStatistics, SaveRouteParams},
};

/// Length of minted share tokens.
const SHARE_TOKEN_LEN: usize = 32;

/// Minimum number of waypoints a stored route must carry.
const MIN_WAYPOINTS: usize = 2;

/// A route together with the user ids it is shared with.
pub type RouteWithShares = (Route, Vec<i32>);

pub struct RouteService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RouteService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a route owned by the caller.
    pub async fn create_route(
        &self,
        owner_id: i32,
        params: SaveRouteParams,
    ) -> Result<RouteWithShares, AppError> {
        Self::validate_waypoints(&params)?;

        let route = RouteRepository::new(self.db).create(owner_id, params).await?;

        Ok((route, Vec::new()))
    }

    /// The caller's own routes, newest first.
    pub async fn my_routes(&self, owner_id: i32) -> Result<Vec<RouteWithShares>, AppError> {
        let repo = RouteRepository::new(self.db);
        let routes = repo.for_owner(owner_id).await?;

        self.attach_shares(routes).await
    }

    /// Routes other users have shared with the caller.
    pub async fn shared_with_me(&self, user_id: i32) -> Result<Vec<RouteWithShares>, AppError> {
        let repo = RouteRepository::new(self.db);
        let routes = repo.shared_with_user(user_id).await?;

        self.attach_shares(routes).await
    }

    /// Reads one route. Access requires being the owner, being in the
    /// shared-with set, or the route being public.
    pub async fn route(&self, route_id: i32, user_id: i32) -> Result<RouteWithShares, AppError> {
        let repo = RouteRepository::new(self.db);
        let route = repo
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        let allowed = route.owner_id == user_id
            || route.is_public
            || repo.is_shared_with(route_id, user_id).await?;
        if !allowed {
            return Err(AppError::Forbidden(
                "You don't have access to this route".to_string(),
            ));
        }

        let shares = repo.shared_user_ids(route_id).await?;

        Ok((route, shares))
    }

    /// Full update; owner-only.
    pub async fn update_route(
        &self,
        route_id: i32,
        user_id: i32,
        params: SaveRouteParams,
    ) -> Result<RouteWithShares, AppError> {
        Self::validate_waypoints(&params)?;

        let repo = RouteRepository::new(self.db);
        self.require_owner(&repo, route_id, user_id, "You can only update your own routes")
            .await?;

        let route = repo.update(route_id, params).await?;
        let shares = repo.shared_user_ids(route_id).await?;

        Ok((route, shares))
    }

    /// Deletes a route and its share rows; owner-only.
    pub async fn delete_route(&self, route_id: i32, user_id: i32) -> Result<(), AppError> {
        let repo = RouteRepository::new(self.db);
        self.require_owner(&repo, route_id, user_id, "You can only delete your own routes")
            .await?;

        repo.remove_shares_for_route(route_id).await?;
        repo.delete(route_id).await?;

        Ok(())
    }

    /// Shares the route with the given users; owner-only. Ids already in the
    /// shared set are silently skipped: set semantics, no duplicate error.
    pub async fn share_route(
        &self,
        route_id: i32,
        owner_id: i32,
        user_ids: &[i32],
    ) -> Result<RouteWithShares, AppError> {
        let repo = RouteRepository::new(self.db);
        let route = self
            .require_owner(&repo, route_id, owner_id, "You can only share your own routes")
            .await?;

        let users = UserRepository::new(self.db);
        for &user_id in user_ids {
            if user_id == owner_id {
                continue;
            }
            users
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

            if !repo.is_shared_with(route_id, user_id).await? {
                repo.add_share(route_id, user_id).await?;
            }
        }

        let shares = repo.shared_user_ids(route_id).await?;

        Ok((route, shares))
    }

    /// Removes one user from the shared set; owner-only, no error when the
    /// user was not in the set.
    pub async fn unshare_route(
        &self,
        route_id: i32,
        owner_id: i32,
        user_id: i32,
    ) -> Result<RouteWithShares, AppError> {
        let repo = RouteRepository::new(self.db);
        let route = self
            .require_owner(&repo, route_id, owner_id, "You can only unshare your own routes")
            .await?;

        repo.remove_share(route_id, user_id).await?;

        let shares = repo.shared_user_ids(route_id).await?;

        Ok((route, shares))
    }

    /// Mints a share token if none exists; repeated calls return the same
    /// token until it is revoked.
    pub async fn generate_share_link(
        &self,
        route_id: i32,
        owner_id: i32,
    ) -> Result<Route, AppError> {
        let repo = RouteRepository::new(self.db);
        let route = self
            .require_owner(
                &repo,
                route_id,
                owner_id,
                "You can only generate share links for your own routes",
            )
            .await?;

        if route.share_token.is_some() {
            return Ok(route);
        }

        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(SHARE_TOKEN_LEN)
            .map(char::from)
            .collect();

        repo.set_share_token(route_id, Some(token)).await
    }

    /// Clears the share token; owner-only.
    pub async fn revoke_share_link(&self, route_id: i32, owner_id: i32) -> Result<Route, AppError> {
        let repo = RouteRepository::new(self.db);
        self.require_owner(
            &repo,
            route_id,
            owner_id,
            "You can only revoke share links for your own routes",
        )
        .await?;

        repo.set_share_token(route_id, None).await
    }

    /// Unauthenticated read by share token; grants full read access
    /// regardless of the public flag.
    pub async fn route_by_token(&self, token: &str) -> Result<RouteWithShares, AppError> {
        let repo = RouteRepository::new(self.db);
        let route = repo
            .find_by_share_token(token)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        let shares = repo.shared_user_ids(route.id).await?;

        Ok((route, shares))
    }

    /// Name search within the caller's own routes.
    pub async fn search_my_routes(
        &self,
        owner_id: i32,
        query: &str,
    ) -> Result<Vec<RouteWithShares>, AppError> {
        let repo = RouteRepository::new(self.db);
        let routes = repo.search_by_name(owner_id, query.trim()).await?;

        self.attach_shares(routes).await
    }

    /// Aggregate totals over the caller's own routes.
    pub async fn statistics(&self, owner_id: i32) -> Result<RouteStatistics, AppError> {
        let routes = RouteRepository::new(self.db).for_owner(owner_id).await?;

        Ok(RouteStatistics {
            total_routes: routes.len() as u64,
            total_distance_km: routes.iter().map(|r| r.distance_km).sum(),
            total_duration_minutes: routes.iter().map(|r| r.duration_minutes as i64).sum(),
        })
    }

    fn validate_waypoints(params: &SaveRouteParams) -> Result<(), AppError> {
        if params.waypoints.len() < MIN_WAYPOINTS {
            return Err(AppError::BadRequest(
                "Route must have at least 2 waypoints".to_string(),
            ));
        }

        Ok(())
    }

    async fn require_owner(
        &self,
        repo: &RouteRepository<'_>,
        route_id: i32,
        user_id: i32,
        denial: &str,
    ) -> Result<Route, AppError> {
        let route = repo
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        if route.owner_id != user_id {
            return Err(AppError::Forbidden(denial.to_string()));
        }

        Ok(route)
    }

    async fn attach_shares(&self, routes: Vec<Route>) -> Result<Vec<RouteWithShares>, AppError> {
        let repo = RouteRepository::new(self.db);

        let mut result = Vec::with_capacity(routes.len());
        for route in routes {
            let shares = repo.shared_user_ids(route.id).await?;
            result.push((route, shares));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::route::Waypoint;
    use test_utils::{
        builder::TestBuilder,
        factory::{route::RouteFactory, user::create_user},
    };

    fn save_params(name: &str, waypoint_count: usize) -> SaveRouteParams {
        SaveRouteParams {
            name: name.to_string(),
            description: None,
            waypoints: (0..waypoint_count)
                .map(|i| Waypoint {
                    lat: 41.0 + i as f64,
                    lng: 29.0 + i as f64,
                    label: None,
                })
                .collect(),
            distance_km: 10.0,
            duration_minutes: 30,
            is_public: false,
        }
    }

    #[tokio::test]
    async fn create_route_requires_two_waypoints() {
        let test = TestBuilder::new().with_route_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let owner = create_user(db).await.unwrap();

        let service = RouteService::new(db);
        let result = service.create_route(owner.id, save_params("Short", 1)).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    /// Repeated calls return the identical token until it is revoked; a
    /// fresh call afterwards mints a different one.
    #[tokio::test]
    async fn share_link_is_idempotent_until_revoked() {
        let test = TestBuilder::new().with_route_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let owner = create_user(db).await.unwrap();
        let route = RouteFactory::new(db, owner.id).build().await.unwrap();

        let service = RouteService::new(db);

        let first = service.generate_share_link(route.id, owner.id).await.unwrap();
        let second = service.generate_share_link(route.id, owner.id).await.unwrap();
        let token = first.share_token.clone().unwrap();
        assert_eq!(first.share_token, second.share_token);

        service.revoke_share_link(route.id, owner.id).await.unwrap();
        assert!(matches!(
            service.route_by_token(&token).await,
            Err(AppError::NotFound(_))
        ));

        let third = service.generate_share_link(route.id, owner.id).await.unwrap();
        assert_ne!(third.share_token.unwrap(), token);
    }

    #[tokio::test]
    async fn route_by_token_reads_private_routes() {
        let test = TestBuilder::new().with_route_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let owner = create_user(db).await.unwrap();
        let route = RouteFactory::new(db, owner.id).build().await.unwrap();

        let service = RouteService::new(db);
        let minted = service.generate_share_link(route.id, owner.id).await.unwrap();
        let token = minted.share_token.unwrap();

        let (fetched, _) = service.route_by_token(&token).await.unwrap();
        assert_eq!(fetched.id, route.id);
        assert!(!fetched.is_public);
    }

    #[tokio::test]
    async fn share_route_is_owner_only_with_set_semantics() {
        let test = TestBuilder::new().with_route_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let owner = create_user(db).await.unwrap();
        let friend = create_user(db).await.unwrap();
        let route = RouteFactory::new(db, owner.id).build().await.unwrap();

        let service = RouteService::new(db);

        let by_other = service.share_route(route.id, friend.id, &[owner.id]).await;
        assert!(matches!(by_other, Err(AppError::Forbidden(_))));

        // Sharing twice leaves a single entry.
        service
            .share_route(route.id, owner.id, &[friend.id])
            .await
            .unwrap();
        let (_, shares) = service
            .share_route(route.id, owner.id, &[friend.id])
            .await
            .unwrap();
        assert_eq!(shares, vec![friend.id]);

        // Unsharing an absent id is not an error.
        let (_, shares) = service
            .unshare_route(route.id, owner.id, friend.id)
            .await
            .unwrap();
        assert!(shares.is_empty());
        service
            .unshare_route(route.id, owner.id, friend.id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn private_route_is_hidden_from_strangers() {
        let test = TestBuilder::new().with_route_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let owner = create_user(db).await.unwrap();
        let stranger = create_user(db).await.unwrap();
        let route = RouteFactory::new(db, owner.id).build().await.unwrap();

        let service = RouteService::new(db);
        let result = service.route(route.id, stranger.id).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn statistics_sum_over_owned_routes() {
        let test = TestBuilder::new().with_route_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let owner = create_user(db).await.unwrap();
        RouteFactory::new(db, owner.id)
            .distance_km(10.0)
            .duration_minutes(60)
            .build()
            .await
            .unwrap();
        RouteFactory::new(db, owner.id)
            .distance_km(5.5)
            .duration_minutes(30)
            .build()
            .await
            .unwrap();

        let service = RouteService::new(db);
        let stats = service.statistics(owner.id).await.unwrap();

        assert_eq!(stats.total_routes, 2);
        assert!((stats.total_distance_km - 15.5).abs() < f64::EPSILON);
        assert_eq!(stats.total_duration_minutes, 90);
    }
}

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ApiResponse,
        route::{RouteDto, RouteStatisticsDto, SaveRouteDto, ShareLinkDto, ShareRouteDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::route::SaveRouteParams,
        service::route::{RouteService, RouteWithShares},
        state::AppState,
    },
};

/// Tag for grouping route endpoints in OpenAPI documentation
pub static ROUTE_TAG: &str = "routes";

#[derive(Deserialize)]
pub struct RouteSearchParams {
    #[serde(default)]
    pub q: String,
}

fn to_dto((route, shares): RouteWithShares) -> RouteDto {
    route.into_dto(shares)
}

/// Save a new route. At least two waypoints are required.
#[utoipa::path(
    post,
    path = "/api/routes",
    tag = ROUTE_TAG,
    request_body = SaveRouteDto,
    responses(
        (status = 201, description = "Route created", body = RouteDto),
        (status = 400, description = "Fewer than 2 waypoints")
    ),
)]
pub async fn create_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SaveRouteDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let created = RouteService::new(&state.db)
        .create_route(user.id, SaveRouteParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Route created", to_dto(created))),
    ))
}

/// The caller's own routes, newest first.
#[utoipa::path(
    get,
    path = "/api/routes/my-routes",
    tag = ROUTE_TAG,
    responses((status = 200, description = "Routes", body = [RouteDto])),
)]
pub async fn my_routes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let routes = RouteService::new(&state.db).my_routes(user.id).await?;
    let routes: Vec<RouteDto> = routes.into_iter().map(to_dto).collect();

    Ok(Json(ApiResponse::success("My routes", routes)))
}

/// Routes other users have shared with the caller.
#[utoipa::path(
    get,
    path = "/api/routes/shared-with-me",
    tag = ROUTE_TAG,
    responses((status = 200, description = "Shared routes", body = [RouteDto])),
)]
pub async fn shared_with_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let routes = RouteService::new(&state.db).shared_with_me(user.id).await?;
    let routes: Vec<RouteDto> = routes.into_iter().map(to_dto).collect();

    Ok(Json(ApiResponse::success("Shared with me", routes)))
}

/// Name search within the caller's own routes.
#[utoipa::path(
    get,
    path = "/api/routes/search",
    tag = ROUTE_TAG,
    params(("q" = String, Query, description = "Name substring")),
    responses((status = 200, description = "Matching routes", body = [RouteDto])),
)]
pub async fn search_routes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<RouteSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let routes = RouteService::new(&state.db)
        .search_my_routes(user.id, &params.q)
        .await?;
    let routes: Vec<RouteDto> = routes.into_iter().map(to_dto).collect();

    Ok(Json(ApiResponse::success("Search results", routes)))
}

/// Aggregate totals over the caller's own routes.
#[utoipa::path(
    get,
    path = "/api/routes/statistics",
    tag = ROUTE_TAG,
    responses((status = 200, description = "Statistics", body = RouteStatisticsDto)),
)]
pub async fn statistics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let stats = RouteService::new(&state.db).statistics(user.id).await?;

    Ok(Json(ApiResponse::success("Statistics", stats.into_dto())))
}

/// Read one route. The caller must be the owner, in the shared-with set, or
/// the route must be public.
#[utoipa::path(
    get,
    path = "/api/routes/{route_id}",
    tag = ROUTE_TAG,
    params(("route_id" = i32, Path, description = "Route id")),
    responses(
        (status = 200, description = "Route", body = RouteDto),
        (status = 403, description = "No access"),
        (status = 404, description = "Route not found")
    ),
)]
pub async fn get_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(route_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let route = RouteService::new(&state.db).route(route_id, user.id).await?;

    Ok(Json(ApiResponse::success("Route", to_dto(route))))
}

/// Update a route; owner only.
#[utoipa::path(
    put,
    path = "/api/routes/{route_id}",
    tag = ROUTE_TAG,
    params(("route_id" = i32, Path, description = "Route id")),
    request_body = SaveRouteDto,
    responses(
        (status = 200, description = "Route updated", body = RouteDto),
        (status = 403, description = "Caller is not the owner")
    ),
)]
pub async fn update_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(route_id): Path<i32>,
    Json(payload): Json<SaveRouteDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let updated = RouteService::new(&state.db)
        .update_route(route_id, user.id, SaveRouteParams::from_dto(payload))
        .await?;

    Ok(Json(ApiResponse::success("Route updated", to_dto(updated))))
}

/// Delete a route; owner only.
#[utoipa::path(
    delete,
    path = "/api/routes/{route_id}",
    tag = ROUTE_TAG,
    params(("route_id" = i32, Path, description = "Route id")),
    responses(
        (status = 200, description = "Route deleted"),
        (status = 403, description = "Caller is not the owner")
    ),
)]
pub async fn delete_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(route_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    RouteService::new(&state.db)
        .delete_route(route_id, user.id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty("Route deleted")))
}

/// Share a route with friends; owner only, with set semantics: ids already
/// shared are silently skipped.
#[utoipa::path(
    post,
    path = "/api/routes/{route_id}/share",
    tag = ROUTE_TAG,
    params(("route_id" = i32, Path, description = "Route id")),
    request_body = ShareRouteDto,
    responses(
        (status = 200, description = "Route shared", body = RouteDto),
        (status = 403, description = "Caller is not the owner")
    ),
)]
pub async fn share_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(route_id): Path<i32>,
    Json(payload): Json<ShareRouteDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let shared = RouteService::new(&state.db)
        .share_route(route_id, user.id, &payload.user_ids)
        .await?;

    Ok(Json(ApiResponse::success("Route shared", to_dto(shared))))
}

/// Remove a user from the shared set; owner only, no error if absent.
#[utoipa::path(
    delete,
    path = "/api/routes/{route_id}/share/{user_id}",
    tag = ROUTE_TAG,
    params(
        ("route_id" = i32, Path, description = "Route id"),
        ("user_id" = i32, Path, description = "User to unshare")
    ),
    responses(
        (status = 200, description = "Route unshared", body = RouteDto),
        (status = 403, description = "Caller is not the owner")
    ),
)]
pub async fn unshare_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((route_id, user_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let unshared = RouteService::new(&state.db)
        .unshare_route(route_id, user.id, user_id)
        .await?;

    Ok(Json(ApiResponse::success("Route unshared", to_dto(unshared))))
}

/// Mint a public share link; owner only. Idempotent: repeated calls return
/// the same token until it is revoked.
#[utoipa::path(
    post,
    path = "/api/routes/{route_id}/share-link",
    tag = ROUTE_TAG,
    params(("route_id" = i32, Path, description = "Route id")),
    responses(
        (status = 200, description = "Share link", body = ShareLinkDto),
        (status = 403, description = "Caller is not the owner")
    ),
)]
pub async fn generate_share_link(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(route_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let route = RouteService::new(&state.db)
        .generate_share_link(route_id, user.id)
        .await?;

    let share_token = route.share_token.unwrap_or_default();
    let url = format!("{}/routes/shared/{}", state.app_url, share_token);

    Ok(Json(ApiResponse::success(
        "Share link generated",
        ShareLinkDto { share_token, url },
    )))
}

/// Revoke the share link; owner only. The old token stops resolving.
#[utoipa::path(
    delete,
    path = "/api/routes/{route_id}/share-link",
    tag = ROUTE_TAG,
    params(("route_id" = i32, Path, description = "Route id")),
    responses(
        (status = 200, description = "Share link revoked"),
        (status = 403, description = "Caller is not the owner")
    ),
)]
pub async fn revoke_share_link(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(route_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    RouteService::new(&state.db)
        .revoke_share_link(route_id, user.id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty("Share link revoked")))
}

/// Read a route by share token. No authentication; the token alone grants
/// full read access regardless of the public flag.
#[utoipa::path(
    get,
    path = "/api/routes/shared/{share_token}",
    tag = ROUTE_TAG,
    params(("share_token" = String, Path, description = "Opaque share token")),
    responses(
        (status = 200, description = "Route", body = RouteDto),
        (status = 404, description = "Unknown or revoked token")
    ),
)]
pub async fn route_by_token(
    State(state): State<AppState>,
    Path(share_token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let route = RouteService::new(&state.db)
        .route_by_token(&share_token)
        .await?;

    Ok(Json(ApiResponse::success("Route", to_dto(route))))
}

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
        site_blog::{CreateSiteBlogDto, SiteBlogDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::site_blog::SiteBlogParams,
        service::site_blog::SiteBlogService, state::AppState,
    },
};

/// Tag for grouping site blog endpoints in OpenAPI documentation
pub static SITE_BLOG_TAG: &str = "site-blog";

#[derive(Deserialize)]
pub struct SiteBlogListParams {
    pub category: Option<String>,
}

/// All site blog posts, optionally restricted to one category ("ALL" means
/// no filter). Public.
#[utoipa::path(
    get,
    path = "/api/site-blogs",
    tag = SITE_BLOG_TAG,
    params(("category" = Option<String>, Query, description = "Exact category, or ALL")),
    responses((status = 200, description = "Posts", body = [SiteBlogDto])),
)]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SiteBlogListParams>,
) -> Result<impl IntoResponse, AppError> {
    let views = SiteBlogService::new(&state.db)
        .posts(params.category.as_deref())
        .await?;
    let posts: Vec<SiteBlogDto> = views.into_iter().map(|v| v.into_dto()).collect();

    Ok(Json(ApiResponse::success("Posts", posts)))
}

/// A single post. Public.
#[utoipa::path(
    get,
    path = "/api/site-blogs/{blog_id}",
    tag = SITE_BLOG_TAG,
    params(("blog_id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = SiteBlogDto),
        (status = 404, description = "Post not found")
    ),
)]
pub async fn get(
    State(state): State<AppState>,
    Path(blog_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let view = SiteBlogService::new(&state.db).post(blog_id).await?;

    Ok(Json(ApiResponse::success("Post", view.into_dto())))
}

/// Posts by one author. Public.
#[utoipa::path(
    get,
    path = "/api/site-blogs/author/{user_id}",
    tag = SITE_BLOG_TAG,
    params(("user_id" = i32, Path, description = "Author id")),
    responses((status = 200, description = "Posts", body = [SiteBlogDto])),
)]
pub async fn by_author(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let views = SiteBlogService::new(&state.db).posts_by_author(user_id).await?;
    let posts: Vec<SiteBlogDto> = views.into_iter().map(|v| v.into_dto()).collect();

    Ok(Json(ApiResponse::success("Posts", posts)))
}

/// Create a post; admins only.
#[utoipa::path(
    post,
    path = "/api/site-blogs",
    tag = SITE_BLOG_TAG,
    request_body = CreateSiteBlogDto,
    responses(
        (status = 201, description = "Post created", body = SiteBlogDto),
        (status = 403, description = "Caller is not an admin")
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateSiteBlogDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let view = SiteBlogService::new(&state.db)
        .create_post(&user, SiteBlogParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Post created", view.into_dto())),
    ))
}

/// Update a post; admins and the original author.
#[utoipa::path(
    put,
    path = "/api/site-blogs/{blog_id}",
    tag = SITE_BLOG_TAG,
    params(("blog_id" = i32, Path, description = "Post id")),
    request_body = CreateSiteBlogDto,
    responses(
        (status = 200, description = "Post updated", body = SiteBlogDto),
        (status = 403, description = "Caller may not edit this post")
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(blog_id): Path<i32>,
    Json(payload): Json<CreateSiteBlogDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let view = SiteBlogService::new(&state.db)
        .update_post(blog_id, &user, SiteBlogParams::from_dto(payload))
        .await?;

    Ok(Json(ApiResponse::success("Post updated", view.into_dto())))
}

/// Delete a post; admins and the original author.
#[utoipa::path(
    delete,
    path = "/api/site-blogs/{blog_id}",
    tag = SITE_BLOG_TAG,
    params(("blog_id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 403, description = "Caller may not delete this post")
    ),
)]
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(blog_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    SiteBlogService::new(&state.db).delete_post(blog_id, &user).await?;

    Ok(Json(ApiResponse::<()>::success_empty("Post deleted")))
}

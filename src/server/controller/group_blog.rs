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
        group_blog::{CreateGroupBlogDto, GroupBlogDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::group_blog::GroupBlogParams,
        service::group_blog::GroupBlogService, state::AppState,
    },
};

/// Tag for grouping group blog endpoints in OpenAPI documentation
pub static GROUP_BLOG_TAG: &str = "group-blog";

#[derive(Deserialize)]
pub struct BlogSearchParams {
    #[serde(default)]
    pub q: String,
}

/// Posts of a group, newest first; members only.
#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/blogs",
    tag = GROUP_BLOG_TAG,
    params(("group_id" = i32, Path, description = "Group id")),
    responses(
        (status = 200, description = "Posts", body = [GroupBlogDto]),
        (status = 403, description = "Caller is not a member")
    ),
)]
pub async fn group_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let views = GroupBlogService::new(&state.db)
        .group_posts(group_id, user.id)
        .await?;
    let posts: Vec<GroupBlogDto> = views.into_iter().map(|v| v.into_dto()).collect();

    Ok(Json(ApiResponse::success("Posts", posts)))
}

/// Create a post in a group; members only.
#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/blogs",
    tag = GROUP_BLOG_TAG,
    params(("group_id" = i32, Path, description = "Group id")),
    request_body = CreateGroupBlogDto,
    responses(
        (status = 201, description = "Post created", body = GroupBlogDto),
        (status = 403, description = "Caller is not a member")
    ),
)]
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<i32>,
    Json(payload): Json<CreateGroupBlogDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let view = GroupBlogService::new(&state.db)
        .create_post(group_id, user.id, GroupBlogParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Post created", view.into_dto())),
    ))
}

/// Title search within one group; members only.
#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/blogs/search",
    tag = GROUP_BLOG_TAG,
    params(
        ("group_id" = i32, Path, description = "Group id"),
        ("q" = String, Query, description = "Title substring")
    ),
    responses((status = 200, description = "Matching posts", body = [GroupBlogDto])),
)]
pub async fn search_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<i32>,
    Query(params): Query<BlogSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let views = GroupBlogService::new(&state.db)
        .search(group_id, user.id, &params.q)
        .await?;
    let posts: Vec<GroupBlogDto> = views.into_iter().map(|v| v.into_dto()).collect();

    Ok(Json(ApiResponse::success("Search results", posts)))
}

/// The caller's own posts across every group.
#[utoipa::path(
    get,
    path = "/api/blogs/my-blogs",
    tag = GROUP_BLOG_TAG,
    responses((status = 200, description = "Caller's posts", body = [GroupBlogDto])),
)]
pub async fn my_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let views = GroupBlogService::new(&state.db).my_posts(user.id).await?;
    let posts: Vec<GroupBlogDto> = views.into_iter().map(|v| v.into_dto()).collect();

    Ok(Json(ApiResponse::success("My posts", posts)))
}

/// A single post; the reader must currently belong to its group.
#[utoipa::path(
    get,
    path = "/api/blogs/{blog_id}",
    tag = GROUP_BLOG_TAG,
    params(("blog_id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = GroupBlogDto),
        (status = 403, description = "Caller is not a member of the post's group")
    ),
)]
pub async fn get_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(blog_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let view = GroupBlogService::new(&state.db).post(blog_id, user.id).await?;

    Ok(Json(ApiResponse::success("Post", view.into_dto())))
}

/// Update a post; author only.
#[utoipa::path(
    put,
    path = "/api/blogs/{blog_id}",
    tag = GROUP_BLOG_TAG,
    params(("blog_id" = i32, Path, description = "Post id")),
    request_body = CreateGroupBlogDto,
    responses(
        (status = 200, description = "Post updated", body = GroupBlogDto),
        (status = 403, description = "Caller is not the author")
    ),
)]
pub async fn update_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(blog_id): Path<i32>,
    Json(payload): Json<CreateGroupBlogDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let view = GroupBlogService::new(&state.db)
        .update_post(blog_id, user.id, GroupBlogParams::from_dto(payload))
        .await?;

    Ok(Json(ApiResponse::success("Post updated", view.into_dto())))
}

/// Delete a post; author only.
#[utoipa::path(
    delete,
    path = "/api/blogs/{blog_id}",
    tag = GROUP_BLOG_TAG,
    params(("blog_id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 403, description = "Caller is not the author")
    ),
)]
pub async fn delete_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(blog_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    GroupBlogService::new(&state.db)
        .delete_post(blog_id, user.id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty("Post deleted")))
}

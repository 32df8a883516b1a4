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
        group::{CreateGroupDto, GroupDetailDto, GroupDto, GroupMemberDto, UpdateGroupDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::group::{CreateGroupParams, UpdateGroupParams},
        service::group::ActivityGroupService,
        state::AppState,
    },
};

/// Tag for grouping activity group endpoints in OpenAPI documentation
pub static GROUP_TAG: &str = "groups";

#[derive(Deserialize)]
pub struct GroupSearchParams {
    #[serde(default)]
    pub q: String,
    pub category: Option<String>,
}

/// All groups with the caller's membership flag.
#[utoipa::path(
    get,
    path = "/api/groups",
    tag = GROUP_TAG,
    responses((status = 200, description = "Groups", body = [GroupDto])),
)]
pub async fn list_groups(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let groups = ActivityGroupService::new(&state.db).all_groups(user.id).await?;
    let groups: Vec<GroupDto> = groups.into_iter().map(|g| g.into_dto()).collect();

    Ok(Json(ApiResponse::success("Groups", groups)))
}

/// Search groups by name or description, optionally restricted to one
/// category ("ALL" means no filter).
#[utoipa::path(
    get,
    path = "/api/groups/search",
    tag = GROUP_TAG,
    params(
        ("q" = String, Query, description = "Substring to match"),
        ("category" = Option<String>, Query, description = "Exact category, or ALL")
    ),
    responses((status = 200, description = "Matching groups", body = [GroupDto])),
)]
pub async fn search_groups(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<GroupSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let groups = ActivityGroupService::new(&state.db)
        .search_groups(&params.q, params.category.as_deref(), user.id)
        .await?;
    let groups: Vec<GroupDto> = groups.into_iter().map(|g| g.into_dto()).collect();

    Ok(Json(ApiResponse::success("Search results", groups)))
}

/// Groups the caller belongs to.
#[utoipa::path(
    get,
    path = "/api/groups/my-groups",
    tag = GROUP_TAG,
    responses((status = 200, description = "Caller's groups", body = [GroupDto])),
)]
pub async fn my_groups(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let groups = ActivityGroupService::new(&state.db).user_groups(user.id).await?;
    let groups: Vec<GroupDto> = groups.into_iter().map(|g| g.into_dto()).collect();

    Ok(Json(ApiResponse::success("My groups", groups)))
}

/// Group page: members plus blog and message counts.
#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    tag = GROUP_TAG,
    params(("group_id" = i32, Path, description = "Group id")),
    responses(
        (status = 200, description = "Group detail", body = GroupDetailDto),
        (status = 404, description = "Group not found")
    ),
)]
pub async fn group_detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let detail = ActivityGroupService::new(&state.db)
        .group_detail(group_id, user.id)
        .await?;

    Ok(Json(ApiResponse::success("Group detail", detail.into_dto())))
}

/// Create a group. The caller becomes the immutable owner and first member.
#[utoipa::path(
    post,
    path = "/api/groups",
    tag = GROUP_TAG,
    request_body = CreateGroupDto,
    responses(
        (status = 201, description = "Group created", body = GroupDto),
        (status = 409, description = "Name already taken")
    ),
)]
pub async fn create_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateGroupDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Group name is required".to_string()));
    }

    let overview = ActivityGroupService::new(&state.db)
        .create_group(CreateGroupParams::from_dto(user.id, payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Group created", overview.into_dto())),
    ))
}

/// Partially update a group; creator only. Absent fields keep their stored
/// values.
#[utoipa::path(
    put,
    path = "/api/groups/{group_id}",
    tag = GROUP_TAG,
    params(("group_id" = i32, Path, description = "Group id")),
    request_body = UpdateGroupDto,
    responses(
        (status = 200, description = "Group updated", body = GroupDto),
        (status = 403, description = "Caller is not the creator")
    ),
)]
pub async fn update_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<i32>,
    Json(payload): Json<UpdateGroupDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let overview = ActivityGroupService::new(&state.db)
        .update_group(group_id, user.id, UpdateGroupParams::from_dto(payload))
        .await?;

    Ok(Json(ApiResponse::success("Group updated", overview.into_dto())))
}

/// Delete a group with its members, chat and blog content; creator only.
#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}",
    tag = GROUP_TAG,
    params(("group_id" = i32, Path, description = "Group id")),
    responses(
        (status = 200, description = "Group deleted"),
        (status = 403, description = "Caller is not the creator")
    ),
)]
pub async fn delete_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    ActivityGroupService::new(&state.db)
        .delete_group(group_id, user.id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty("Group deleted")))
}

/// Join a group. Rejects members of the group and joins past the member
/// limit.
#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/join",
    tag = GROUP_TAG,
    params(("group_id" = i32, Path, description = "Group id")),
    responses(
        (status = 200, description = "Joined", body = GroupDto),
        (status = 409, description = "Already a member, or group is full")
    ),
)]
pub async fn join_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let overview = ActivityGroupService::new(&state.db)
        .join_group(group_id, user.id)
        .await?;

    Ok(Json(ApiResponse::success("Joined group", overview.into_dto())))
}

/// Leave a group. The creator can never leave and must delete the group
/// instead.
#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/leave",
    tag = GROUP_TAG,
    params(("group_id" = i32, Path, description = "Group id")),
    responses(
        (status = 200, description = "Left the group"),
        (status = 409, description = "Caller is the creator or not a member")
    ),
)]
pub async fn leave_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    ActivityGroupService::new(&state.db)
        .leave_group(group_id, user.id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty("Left the group")))
}

/// Members of a group, oldest joiner first.
#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/members",
    tag = GROUP_TAG,
    params(("group_id" = i32, Path, description = "Group id")),
    responses((status = 200, description = "Members", body = [GroupMemberDto])),
)]
pub async fn group_members(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let members = ActivityGroupService::new(&state.db).members(group_id).await?;
    let members: Vec<GroupMemberDto> = members.into_iter().map(|m| m.into_dto()).collect();

    Ok(Json(ApiResponse::success("Members", members)))
}

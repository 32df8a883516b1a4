use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserSummaryDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateGroupDto {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub description: Option<String>,
    pub category: String,
    pub max_members: Option<i32>,
    pub is_private: Option<bool>,
}

/// Partial group update; absent fields leave the stored value unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateGroupDto {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub max_members: Option<i32>,
    pub is_private: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GroupDto {
    pub id: i32,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub description: Option<String>,
    pub category: String,
    pub max_members: Option<i32>,
    pub is_private: bool,
    pub creator_id: i32,
    pub member_count: u64,
    pub is_member: bool,
    pub created_at: DateTime<Utc>,
}

/// Group page payload: the group plus members and activity counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GroupDetailDto {
    #[serde(flatten)]
    pub group: GroupDto,
    pub members: Vec<GroupMemberDto>,
    pub blog_count: u64,
    pub message_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GroupMemberDto {
    pub user: UserSummaryDto,
    pub joined_at: DateTime<Utc>,
}

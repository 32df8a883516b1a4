//! Activity group domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::group::{CreateGroupDto, GroupDetailDto, GroupDto, GroupMemberDto, UpdateGroupDto},
    server::model::user::User,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityGroup {
    pub id: i32,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub description: Option<String>,
    pub category: String,
    pub max_members: Option<i32>,
    pub is_private: bool,
    pub creator_id: i32,
    pub created_at: DateTime<Utc>,
}

impl ActivityGroup {
    pub fn from_entity(entity: entity::activity_group::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            icon: entity.icon,
            color: entity.color,
            description: entity.description,
            category: entity.category,
            max_members: entity.max_members,
            is_private: entity.is_private,
            creator_id: entity.creator_id,
            created_at: entity.created_at,
        }
    }
}

/// Group as listed for a particular viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupOverview {
    pub group: ActivityGroup,
    pub member_count: u64,
    pub is_member: bool,
}

impl GroupOverview {
    pub fn into_dto(self) -> GroupDto {
        GroupDto {
            id: self.group.id,
            name: self.group.name,
            icon: self.group.icon,
            color: self.group.color,
            description: self.group.description,
            category: self.group.category,
            max_members: self.group.max_members,
            is_private: self.group.is_private,
            creator_id: self.group.creator_id,
            member_count: self.member_count,
            is_member: self.is_member,
            created_at: self.group.created_at,
        }
    }
}

/// One group membership joined with the member's user record.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMembership {
    pub user: User,
    pub joined_at: DateTime<Utc>,
}

impl GroupMembership {
    pub fn into_dto(self) -> GroupMemberDto {
        GroupMemberDto {
            user: self.user.into_summary_dto(),
            joined_at: self.joined_at,
        }
    }
}

/// Group page payload with members and activity counts.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDetail {
    pub overview: GroupOverview,
    pub members: Vec<GroupMembership>,
    pub blog_count: u64,
    pub message_count: u64,
}

impl GroupDetail {
    pub fn into_dto(self) -> GroupDetailDto {
        GroupDetailDto {
            group: self.overview.into_dto(),
            members: self.members.into_iter().map(|m| m.into_dto()).collect(),
            blog_count: self.blog_count,
            message_count: self.message_count,
        }
    }
}

/// Parameters for creating a group. The creator becomes the immutable owner
/// and first member.
#[derive(Debug, Clone)]
pub struct CreateGroupParams {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub description: Option<String>,
    pub category: String,
    pub max_members: Option<i32>,
    pub is_private: bool,
    pub creator_id: i32,
}

impl CreateGroupParams {
    pub fn from_dto(creator_id: i32, dto: CreateGroupDto) -> Self {
        Self {
            name: dto.name,
            icon: dto.icon,
            color: dto.color,
            description: dto.description,
            category: dto.category,
            max_members: dto.max_members,
            is_private: dto.is_private.unwrap_or(false),
            creator_id,
        }
    }
}

/// Partial group update; `None` fields leave existing values unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateGroupParams {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub max_members: Option<i32>,
    pub is_private: Option<bool>,
}

impl UpdateGroupParams {
    pub fn from_dto(dto: UpdateGroupDto) -> Self {
        Self {
            name: dto.name,
            icon: dto.icon,
            color: dto.color,
            description: dto.description,
            category: dto.category,
            max_members: dto.max_members,
            is_private: dto.is_private,
        }
    }
}

//! User domain models and parameters.

use chrono::{DateTime, Utc};

use crate::model::{
    auth::AuthUserDto,
    user::{UpdateProfileDto, UserProfileDto, UserSummaryDto},
};

/// Application user with identity, credentials and profile fields.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub public_id: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to the user domain model at the repository
    /// boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.display_name,
            password_hash: entity.password_hash,
            role: entity.role,
            is_active: entity.is_active,
            bio: entity.bio,
            avatar_url: entity.avatar_url,
            public_id: entity.public_id,
            created_at: entity.created_at,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == "ADMIN"
    }

    /// Compact representation for embedding in other DTOs.
    pub fn into_summary_dto(self) -> UserSummaryDto {
        UserSummaryDto {
            id: self.id,
            name: self.name,
            email: self.email,
            avatar_url: self.avatar_url,
            bio: self.bio,
        }
    }

    /// Representation attached to auth responses.
    pub fn into_auth_user_dto(self) -> AuthUserDto {
        AuthUserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            avatar_url: self.avatar_url,
            created_at: self.created_at,
        }
    }
}

/// Parameters for inserting a new user during registration.
#[derive(Debug, Clone)]
pub struct NewUserParams {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub public_id: String,
}

/// Profile plus the aggregate counts shown on the profile page.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user: User,
    pub friend_count: u64,
    pub group_count: u64,
}

impl UserProfile {
    pub fn into_dto(self) -> UserProfileDto {
        UserProfileDto {
            id: self.user.id,
            public_id: self.user.public_id,
            name: self.user.name,
            email: self.user.email,
            bio: self.user.bio,
            avatar_url: self.user.avatar_url,
            created_at: self.user.created_at,
            friend_count: self.friend_count,
            group_count: self.group_count,
        }
    }
}

/// Partial profile update; `None` preserves the stored value. Values are
/// trimmed, and an empty name is treated as absent.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParams {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdateProfileParams {
    pub fn from_dto(dto: UpdateProfileDto) -> Self {
        Self {
            name: dto
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            bio: dto.bio.map(|b| b.trim().to_string()),
            avatar_url: dto.avatar_url.map(|a| a.trim().to_string()),
        }
    }
}

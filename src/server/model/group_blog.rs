//! Group blog domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::group_blog::{CreateGroupBlogDto, GroupBlogDto},
    server::model::user::User,
};

#[derive(Debug, Clone, PartialEq)]
pub struct GroupBlogPost {
    pub id: i32,
    pub group_id: i32,
    pub author_id: i32,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GroupBlogPost {
    pub fn from_entity(entity: entity::group_blog_post::Model) -> Self {
        Self {
            id: entity.id,
            group_id: entity.group_id,
            author_id: entity.author_id,
            title: entity.title,
            content: entity.content,
            image_url: entity.image_url,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// A blog post joined with its author.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBlogView {
    pub post: GroupBlogPost,
    pub author: User,
}

impl GroupBlogView {
    pub fn into_dto(self) -> GroupBlogDto {
        GroupBlogDto {
            id: self.post.id,
            group_id: self.post.group_id,
            author_id: self.author.id,
            author_name: self.author.name,
            author_avatar: self.author.avatar_url,
            title: self.post.title,
            content: self.post.content,
            image_url: self.post.image_url,
            created_at: self.post.created_at,
            updated_at: self.post.updated_at,
        }
    }
}

/// Parameters for creating or updating a post.
#[derive(Debug, Clone)]
pub struct GroupBlogParams {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

impl GroupBlogParams {
    pub fn from_dto(dto: CreateGroupBlogDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
            image_url: dto.image_url,
        }
    }
}

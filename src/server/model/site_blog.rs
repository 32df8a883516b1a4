//! Site-wide blog domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::site_blog::{CreateSiteBlogDto, SiteBlogDto},
    server::model::user::User,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SiteBlog {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SiteBlog {
    pub fn from_entity(entity: entity::site_blog::Model) -> Self {
        Self {
            id: entity.id,
            author_id: entity.author_id,
            title: entity.title,
            content: entity.content,
            image_url: entity.image_url,
            category: entity.category,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// A blog post joined with its author.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteBlogView {
    pub blog: SiteBlog,
    pub author: User,
}

impl SiteBlogView {
    pub fn into_dto(self) -> SiteBlogDto {
        SiteBlogDto {
            id: self.blog.id,
            author_id: self.author.id,
            author_name: self.author.name,
            title: self.blog.title,
            content: self.blog.content,
            image_url: self.blog.image_url,
            category: self.blog.category,
            created_at: self.blog.created_at,
            updated_at: self.blog.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteBlogParams {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
}

impl SiteBlogParams {
    pub fn from_dto(dto: CreateSiteBlogDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
            image_url: dto.image_url,
            category: dto.category,
        }
    }
}

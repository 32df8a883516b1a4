//! Site blog factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating site-wide blog posts.
pub struct SiteBlogFactory<'a> {
    db: &'a DatabaseConnection,
    author_id: i32,
    title: String,
    content: String,
    image_url: Option<String>,
    category: String,
}

impl<'a> SiteBlogFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, author_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            author_id,
            title: format!("Site blog {}", id),
            content: "Editorial content".to_string(),
            image_url: None,
            category: "TRAVEL".to_string(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builds and inserts the blog row.
    pub async fn build(self) -> Result<entity::site_blog::Model, DbErr> {
        let now = Utc::now();
        entity::site_blog::ActiveModel {
            author_id: ActiveValue::Set(self.author_id),
            title: ActiveValue::Set(self.title),
            content: ActiveValue::Set(self.content),
            image_url: ActiveValue::Set(self.image_url),
            category: ActiveValue::Set(self.category),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

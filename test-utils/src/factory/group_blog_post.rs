//! Group blog post factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating blog posts inside a group.
pub struct GroupBlogPostFactory<'a> {
    db: &'a DatabaseConnection,
    group_id: i32,
    author_id: i32,
    title: String,
    content: String,
    image_url: Option<String>,
}

impl<'a> GroupBlogPostFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, group_id: i32, author_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            group_id,
            author_id,
            title: format!("Post {}", id),
            content: "Trip report".to_string(),
            image_url: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Builds and inserts the post row.
    pub async fn build(self) -> Result<entity::group_blog_post::Model, DbErr> {
        let now = Utc::now();
        entity::group_blog_post::ActiveModel {
            group_id: ActiveValue::Set(self.group_id),
            author_id: ActiveValue::Set(self.author_id),
            title: ActiveValue::Set(self.title),
            content: ActiveValue::Set(self.content),
            image_url: ActiveValue::Set(self.image_url),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

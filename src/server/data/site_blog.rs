//! Site blog data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::site_blog::{SiteBlog, SiteBlogParams};

/// Repository providing database operations for site-wide blog posts.
pub struct SiteBlogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SiteBlogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, author_id: i32, param: SiteBlogParams) -> Result<SiteBlog, DbErr> {
        let now = Utc::now();
        let entity = entity::site_blog::ActiveModel {
            author_id: ActiveValue::Set(author_id),
            title: ActiveValue::Set(param.title),
            content: ActiveValue::Set(param.content),
            image_url: ActiveValue::Set(param.image_url),
            category: ActiveValue::Set(param.category),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(SiteBlog::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<SiteBlog>, DbErr> {
        let entity = entity::prelude::SiteBlog::find_by_id(id).one(self.db).await?;

        Ok(entity.map(SiteBlog::from_entity))
    }

    /// All posts, newest first.
    pub async fn all(&self) -> Result<Vec<SiteBlog>, DbErr> {
        let entities = entity::prelude::SiteBlog::find()
            .order_by_desc(entity::site_blog::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(SiteBlog::from_entity).collect())
    }

    /// Posts in one category, newest first.
    pub async fn by_category(&self, category: &str) -> Result<Vec<SiteBlog>, DbErr> {
        let entities = entity::prelude::SiteBlog::find()
            .filter(entity::site_blog::Column::Category.eq(category))
            .order_by_desc(entity::site_blog::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(SiteBlog::from_entity).collect())
    }

    /// Posts by one author, newest first.
    pub async fn by_author(&self, author_id: i32) -> Result<Vec<SiteBlog>, DbErr> {
        let entities = entity::prelude::SiteBlog::find()
            .filter(entity::site_blog::Column::AuthorId.eq(author_id))
            .order_by_desc(entity::site_blog::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(SiteBlog::from_entity).collect())
    }

    /// Rewrites a post's content fields, refreshing the updated timestamp.
    pub async fn update(&self, id: i32, param: SiteBlogParams) -> Result<SiteBlog, DbErr> {
        let entity = entity::prelude::SiteBlog::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Site blog with id {} not found",
                id
            )))?;

        let mut active_model: entity::site_blog::ActiveModel = entity.into();
        active_model.title = ActiveValue::Set(param.title);
        active_model.content = ActiveValue::Set(param.content);
        active_model.image_url = ActiveValue::Set(param.image_url);
        active_model.category = ActiveValue::Set(param.category);
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        Ok(SiteBlog::from_entity(entity))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::SiteBlog::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes every post the user authored. Used during account removal.
    pub async fn delete_by_author(&self, author_id: i32) -> Result<(), DbErr> {
        entity::prelude::SiteBlog::delete_many()
            .filter(entity::site_blog::Column::AuthorId.eq(author_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}

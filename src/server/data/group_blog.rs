//! Group blog data repository.

use chrono::Utc;
use sea_orm::{
    sea_query::Func, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::group_blog::{GroupBlogParams, GroupBlogPost};

/// Repository providing database operations for group blog posts.
pub struct GroupBlogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GroupBlogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a new post.
    pub async fn create(
        &self,
        group_id: i32,
        author_id: i32,
        param: GroupBlogParams,
    ) -> Result<GroupBlogPost, DbErr> {
        let now = Utc::now();
        let entity = entity::group_blog_post::ActiveModel {
            group_id: ActiveValue::Set(group_id),
            author_id: ActiveValue::Set(author_id),
            title: ActiveValue::Set(param.title),
            content: ActiveValue::Set(param.content),
            image_url: ActiveValue::Set(param.image_url),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(GroupBlogPost::from_entity(entity))
    }

    /// Finds a post by primary key.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<GroupBlogPost>, DbErr> {
        let entity = entity::prelude::GroupBlogPost::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(GroupBlogPost::from_entity))
    }

    /// All posts of a group, newest first.
    pub async fn for_group(&self, group_id: i32) -> Result<Vec<GroupBlogPost>, DbErr> {
        let entities = entity::prelude::GroupBlogPost::find()
            .filter(entity::group_blog_post::Column::GroupId.eq(group_id))
            .order_by_desc(entity::group_blog_post::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(GroupBlogPost::from_entity)
            .collect())
    }

    /// All posts by an author across groups, newest first.
    pub async fn by_author(&self, author_id: i32) -> Result<Vec<GroupBlogPost>, DbErr> {
        let entities = entity::prelude::GroupBlogPost::find()
            .filter(entity::group_blog_post::Column::AuthorId.eq(author_id))
            .order_by_desc(entity::group_blog_post::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(GroupBlogPost::from_entity)
            .collect())
    }

    /// Case-insensitive title search within one group.
    pub async fn search_by_title(
        &self,
        group_id: i32,
        keyword: &str,
    ) -> Result<Vec<GroupBlogPost>, DbErr> {
        let pattern = format!("%{}%", keyword.to_lowercase());

        let entities = entity::prelude::GroupBlogPost::find()
            .filter(entity::group_blog_post::Column::GroupId.eq(group_id))
            .filter(
                sea_orm::sea_query::Expr::expr(Func::lower(sea_orm::sea_query::Expr::col(
                    entity::group_blog_post::Column::Title,
                )))
                .like(&pattern),
            )
            .order_by_desc(entity::group_blog_post::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(GroupBlogPost::from_entity)
            .collect())
    }

    /// Rewrites a post's content fields, refreshing the updated timestamp.
    ///
    /// # Returns
    /// - `Ok(GroupBlogPost)` - The updated post
    /// - `Err(DbErr::RecordNotFound)` - No post with that id
    pub async fn update(&self, id: i32, param: GroupBlogParams) -> Result<GroupBlogPost, DbErr> {
        let entity = entity::prelude::GroupBlogPost::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Blog post with id {} not found",
                id
            )))?;

        let mut active_model: entity::group_blog_post::ActiveModel = entity.into();
        active_model.title = ActiveValue::Set(param.title);
        active_model.content = ActiveValue::Set(param.content);
        active_model.image_url = ActiveValue::Set(param.image_url);
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        Ok(GroupBlogPost::from_entity(entity))
    }

    /// Post count of the group, shown on the group page.
    pub async fn count_for_group(&self, group_id: i32) -> Result<u64, DbErr> {
        entity::prelude::GroupBlogPost::find()
            .filter(entity::group_blog_post::Column::GroupId.eq(group_id))
            .count(self.db)
            .await
    }

    /// Deletes a post by id.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::GroupBlogPost::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes every post of a group. Used when the group is removed.
    pub async fn delete_for_group(&self, group_id: i32) -> Result<(), DbErr> {
        entity::prelude::GroupBlogPost::delete_many()
            .filter(entity::group_blog_post::Column::GroupId.eq(group_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes every post the user authored. Used during account removal.
    pub async fn delete_for_author(&self, author_id: i32) -> Result<(), DbErr> {
        entity::prelude::GroupBlogPost::delete_many()
            .filter(entity::group_blog_post::Column::AuthorId.eq(author_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}

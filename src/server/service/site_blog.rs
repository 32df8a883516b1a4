//! Site-wide blog rules: public reads, admin-gated creation, author-or-admin
//! edits.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{site_blog::SiteBlogRepository, user::UserRepository},
    error::AppError,
    model::{
        site_blog::{SiteBlog, SiteBlogParams, SiteBlogView},
        user::User,
    },
};

/// Sentinel category meaning "no category filter".
const CATEGORY_ALL: &str = "ALL";

pub struct SiteBlogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SiteBlogService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All posts, optionally restricted to one category.
    pub async fn posts(&self, category: Option<&str>) -> Result<Vec<SiteBlogView>, AppError> {
        let repo = SiteBlogRepository::new(self.db);
        let posts = match category.filter(|c| !c.is_empty() && *c != CATEGORY_ALL) {
            Some(category) => repo.by_category(category).await?,
            None => repo.all().await?,
        };

        self.to_views(posts).await
    }

    pub async fn posts_by_author(&self, author_id: i32) -> Result<Vec<SiteBlogView>, AppError> {
        let posts = SiteBlogRepository::new(self.db).by_author(author_id).await?;

        self.to_views(posts).await
    }

    pub async fn post(&self, id: i32) -> Result<SiteBlogView, AppError> {
        let post = SiteBlogRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

        let author = UserRepository::new(self.db)
            .find_by_id(post.author_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(SiteBlogView { blog: post, author })
    }

    /// Creates a post; admins only.
    pub async fn create_post(
        &self,
        acting_user: &User,
        params: SiteBlogParams,
    ) -> Result<SiteBlogView, AppError> {
        if !acting_user.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can create site blogs".to_string(),
            ));
        }

        let post = SiteBlogRepository::new(self.db)
            .create(acting_user.id, params)
            .await?;

        Ok(SiteBlogView {
            blog: post,
            author: acting_user.clone(),
        })
    }

    /// Updates a post; allowed for admins and the original author.
    pub async fn update_post(
        &self,
        id: i32,
        acting_user: &User,
        params: SiteBlogParams,
    ) -> Result<SiteBlogView, AppError> {
        let repo = SiteBlogRepository::new(self.db);
        let post = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

        if !acting_user.is_admin() && post.author_id != acting_user.id {
            return Err(AppError::Forbidden(
                "You don't have permission to update this blog".to_string(),
            ));
        }

        let post = repo.update(id, params).await?;
        let author = UserRepository::new(self.db)
            .find_by_id(post.author_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(SiteBlogView { blog: post, author })
    }

    /// Deletes a post; allowed for admins and the original author.
    pub async fn delete_post(&self, id: i32, acting_user: &User) -> Result<(), AppError> {
        let repo = SiteBlogRepository::new(self.db);
        let post = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

        if !acting_user.is_admin() && post.author_id != acting_user.id {
            return Err(AppError::Forbidden(
                "You don't have permission to delete this blog".to_string(),
            ));
        }

        repo.delete(id).await?;

        Ok(())
    }

    async fn to_views(&self, posts: Vec<SiteBlog>) -> Result<Vec<SiteBlogView>, AppError> {
        let mut ids: Vec<i32> = posts.iter().map(|p| p.author_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let authors: HashMap<i32, User> = UserRepository::new(self.db)
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(posts
            .into_iter()
            .filter_map(|post| {
                let author = authors.get(&post.author_id)?.clone();
                Some(SiteBlogView { blog: post, author })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::prelude::{SiteBlog as SiteBlogTable, User as UserTable};
    use test_utils::{
        builder::TestBuilder,
        factory::user::{create_user, UserFactory},
    };

    fn params(title: &str) -> SiteBlogParams {
        SiteBlogParams {
            title: title.to_string(),
            content: "Editorial".to_string(),
            image_url: None,
            category: "TRAVEL".to_string(),
        }
    }

    async fn load_user(db: &sea_orm::DatabaseConnection, id: i32) -> User {
        UserRepository::new(db).find_by_id(id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn create_is_admin_only() {
        let test = TestBuilder::new()
            .with_table(UserTable)
            .with_table(SiteBlogTable)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let regular = create_user(db).await.unwrap();
        let admin = UserFactory::new(db).role("ADMIN").build().await.unwrap();

        let service = SiteBlogService::new(db);

        let refused = service
            .create_post(&load_user(db, regular.id).await, params("Nope"))
            .await;
        assert!(matches!(refused, Err(AppError::Forbidden(_))));

        let created = service
            .create_post(&load_user(db, admin.id).await, params("Welcome"))
            .await
            .unwrap();
        assert_eq!(created.blog.title, "Welcome");
    }

    #[tokio::test]
    async fn admin_may_update_another_authors_post() {
        let test = TestBuilder::new()
            .with_table(UserTable)
            .with_table(SiteBlogTable)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let author = UserFactory::new(db).role("ADMIN").build().await.unwrap();
        let other_admin = UserFactory::new(db).role("ADMIN").build().await.unwrap();
        let regular = create_user(db).await.unwrap();

        let service = SiteBlogService::new(db);
        let created = service
            .create_post(&load_user(db, author.id).await, params("Original"))
            .await
            .unwrap();

        let by_regular = service
            .update_post(created.blog.id, &load_user(db, regular.id).await, params("No"))
            .await;
        assert!(matches!(by_regular, Err(AppError::Forbidden(_))));

        let updated = service
            .update_post(
                created.blog.id,
                &load_user(db, other_admin.id).await,
                params("Edited"),
            )
            .await
            .unwrap();
        assert_eq!(updated.blog.title, "Edited");
    }
}

//! Group blog rules: member-gated reads and writes, author-only edits.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{group::ActivityGroupRepository, group_blog::GroupBlogRepository, user::UserRepository},
    error::AppError,
    model::{
        group_blog::{GroupBlogParams, GroupBlogPost, GroupBlogView},
        user::User,
    },
};

pub struct GroupBlogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GroupBlogService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a post; member-only.
    pub async fn create_post(
        &self,
        group_id: i32,
        user_id: i32,
        params: GroupBlogParams,
    ) -> Result<GroupBlogView, AppError> {
        self.require_membership(group_id, user_id).await?;

        let author = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let post = GroupBlogRepository::new(self.db)
            .create(group_id, user_id, params)
            .await?;

        Ok(GroupBlogView { post, author })
    }

    /// Posts of a group, newest first; membership is re-validated on read.
    pub async fn group_posts(&self, group_id: i32, user_id: i32) -> Result<Vec<GroupBlogView>, AppError> {
        self.require_membership(group_id, user_id).await?;

        let posts = GroupBlogRepository::new(self.db).for_group(group_id).await?;

        self.to_views(posts).await
    }

    /// A single post; the reader must currently belong to its group.
    pub async fn post(&self, post_id: i32, user_id: i32) -> Result<GroupBlogView, AppError> {
        let post = GroupBlogRepository::new(self.db)
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

        self.require_membership(post.group_id, user_id).await?;

        let author = UserRepository::new(self.db)
            .find_by_id(post.author_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(GroupBlogView { post, author })
    }

    /// The caller's own posts across every group.
    pub async fn my_posts(&self, user_id: i32) -> Result<Vec<GroupBlogView>, AppError> {
        let posts = GroupBlogRepository::new(self.db).by_author(user_id).await?;

        self.to_views(posts).await
    }

    /// Title search within one group; member-only.
    pub async fn search(
        &self,
        group_id: i32,
        user_id: i32,
        keyword: &str,
    ) -> Result<Vec<GroupBlogView>, AppError> {
        self.require_membership(group_id, user_id).await?;

        let posts = GroupBlogRepository::new(self.db)
            .search_by_title(group_id, keyword.trim())
            .await?;

        self.to_views(posts).await
    }

    /// Updates a post; author-only.
    pub async fn update_post(
        &self,
        post_id: i32,
        user_id: i32,
        params: GroupBlogParams,
    ) -> Result<GroupBlogView, AppError> {
        let repo = GroupBlogRepository::new(self.db);
        let post = repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

        if post.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the blog author can update this post".to_string(),
            ));
        }

        let post = repo.update(post_id, params).await?;
        let author = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(GroupBlogView { post, author })
    }

    /// Deletes a post; author-only.
    pub async fn delete_post(&self, post_id: i32, user_id: i32) -> Result<(), AppError> {
        let repo = GroupBlogRepository::new(self.db);
        let post = repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

        if post.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the blog author can delete this post".to_string(),
            ));
        }

        repo.delete(post_id).await?;

        Ok(())
    }

    async fn require_membership(&self, group_id: i32, user_id: i32) -> Result<(), AppError> {
        let groups = ActivityGroupRepository::new(self.db);
        groups
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

        if !groups.is_member(group_id, user_id).await? {
            return Err(AppError::Forbidden(
                "You must be a member of the group to use its blog".to_string(),
            ));
        }

        Ok(())
    }

    async fn to_views(&self, posts: Vec<GroupBlogPost>) -> Result<Vec<GroupBlogView>, AppError> {
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
                Some(GroupBlogView { post, author })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{
        builder::TestBuilder,
        factory::{
            group::{add_member, ActivityGroupFactory},
            group_blog_post::GroupBlogPostFactory,
            user::create_user,
        },
    };

    fn params(title: &str) -> GroupBlogParams {
        GroupBlogParams {
            title: title.to_string(),
            content: "Trip report".to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn create_post_requires_membership() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        let outsider = create_user(db).await.unwrap();
        let group = ActivityGroupFactory::new(db, creator.id).build().await.unwrap();

        let service = GroupBlogService::new(db);
        let result = service
            .create_post(group.id, outsider.id, params("Nope"))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn update_and_delete_are_author_only() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        let member = create_user(db).await.unwrap();
        let group = ActivityGroupFactory::new(db, creator.id).build().await.unwrap();
        add_member(db, group.id, member.id).await.unwrap();
        let post = GroupBlogPostFactory::new(db, group.id, member.id)
            .build()
            .await
            .unwrap();

        let service = GroupBlogService::new(db);

        let update_by_creator = service
            .update_post(post.id, creator.id, params("Hijacked"))
            .await;
        assert!(matches!(update_by_creator, Err(AppError::Forbidden(_))));

        let updated = service
            .update_post(post.id, member.id, params("Edited"))
            .await
            .unwrap();
        assert_eq!(updated.post.title, "Edited");

        let delete_by_creator = service.delete_post(post.id, creator.id).await;
        assert!(matches!(delete_by_creator, Err(AppError::Forbidden(_))));

        service.delete_post(post.id, member.id).await.unwrap();
    }

    #[tokio::test]
    async fn former_member_cannot_read_group_posts() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        let member = create_user(db).await.unwrap();
        let group = ActivityGroupFactory::new(db, creator.id).build().await.unwrap();
        add_member(db, group.id, member.id).await.unwrap();

        ActivityGroupRepository::new(db)
            .remove_member(group.id, member.id)
            .await
            .unwrap();

        let service = GroupBlogService::new(db);
        let result = service.group_posts(group.id, member.id).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}

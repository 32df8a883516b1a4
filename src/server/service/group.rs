//! Activity group rules: creation, membership, capacity and creator
//! privileges.
//!
//! The creator is the immutable owner: always a member, never allowed to
//! leave, and the only user who may update or delete the group.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        group::ActivityGroupRepository, group_blog::GroupBlogRepository,
        group_chat::GroupChatRepository, user::UserRepository,
    },
    error::AppError,
    model::{
        group::{
            ActivityGroup, CreateGroupParams, GroupDetail, GroupMembership, GroupOverview,
            UpdateGroupParams,
        },
        user::User,
    },
};

/// Sentinel category meaning "no category filter".
const CATEGORY_ALL: &str = "ALL";

pub struct ActivityGroupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActivityGroupService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a group; the creator becomes the owner and first member in
    /// one transaction.
    pub async fn create_group(&self, params: CreateGroupParams) -> Result<GroupOverview, AppError> {
        let repo = ActivityGroupRepository::new(self.db);

        if repo.name_exists(&params.name).await? {
            return Err(AppError::Conflict(
                "A group with this name already exists".to_string(),
            ));
        }

        if let Some(max) = params.max_members {
            if max < 1 {
                return Err(AppError::BadRequest(
                    "Member limit must be at least 1".to_string(),
                ));
            }
        }

        let group = repo.create_with_creator(params).await?;

        Ok(GroupOverview {
            group,
            member_count: 1,
            is_member: true,
        })
    }

    /// All groups with the viewer's membership flag.
    pub async fn all_groups(&self, viewer_id: i32) -> Result<Vec<GroupOverview>, AppError> {
        let repo = ActivityGroupRepository::new(self.db);
        let groups = repo.all().await?;

        self.to_overviews(groups, viewer_id).await
    }

    /// Groups the viewer belongs to.
    pub async fn user_groups(&self, user_id: i32) -> Result<Vec<GroupOverview>, AppError> {
        let repo = ActivityGroupRepository::new(self.db);
        let groups = repo.for_user(user_id).await?;

        self.to_overviews(groups, user_id).await
    }

    /// Case-insensitive name/description search with an optional exact
    /// category filter; "ALL" (or absent) means no filter.
    pub async fn search_groups(
        &self,
        query: &str,
        category: Option<&str>,
        viewer_id: i32,
    ) -> Result<Vec<GroupOverview>, AppError> {
        let category = category.filter(|c| !c.is_empty() && *c != CATEGORY_ALL);

        let repo = ActivityGroupRepository::new(self.db);
        let groups = repo.search(query.trim(), category).await?;

        self.to_overviews(groups, viewer_id).await
    }

    /// Group page: members plus blog and message counts.
    pub async fn group_detail(&self, group_id: i32, viewer_id: i32) -> Result<GroupDetail, AppError> {
        let repo = ActivityGroupRepository::new(self.db);
        let group = repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

        let overview = self.to_overview(group, viewer_id).await?;
        let members = self.members(group_id).await?;
        let blog_count = GroupBlogRepository::new(self.db)
            .count_for_group(group_id)
            .await?;
        let message_count = GroupChatRepository::new(self.db)
            .count_for_group(group_id)
            .await?;

        Ok(GroupDetail {
            overview,
            members,
            blog_count,
            message_count,
        })
    }

    /// Members of the group, oldest joiner first.
    pub async fn members(&self, group_id: i32) -> Result<Vec<GroupMembership>, AppError> {
        let repo = ActivityGroupRepository::new(self.db);
        let memberships = repo.memberships(group_id).await?;

        let ids: Vec<i32> = memberships.iter().map(|m| m.user_id).collect();
        let users: HashMap<i32, User> = UserRepository::new(self.db)
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(memberships
            .into_iter()
            .filter_map(|m| {
                let user = users.get(&m.user_id)?.clone();
                Some(GroupMembership {
                    user,
                    joined_at: m.joined_at,
                })
            })
            .collect())
    }

    /// Joins the group. Rejects existing members and, when `max_members` is
    /// set, any join once the member count has reached it.
    pub async fn join_group(&self, group_id: i32, user_id: i32) -> Result<GroupOverview, AppError> {
        let repo = ActivityGroupRepository::new(self.db);
        let group = repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if repo.is_member(group_id, user_id).await? {
            return Err(AppError::Conflict(
                "User is already a member of this group".to_string(),
            ));
        }

        if let Some(max) = group.max_members {
            let current = repo.member_count(group_id).await?;
            if current >= max as u64 {
                return Err(AppError::Conflict("Group is full".to_string()));
            }
        }

        repo.add_member(group_id, user_id).await?;

        self.to_overview(group, user_id).await
    }

    /// Leaves the group. Rejects non-members; rejects the creator
    /// unconditionally; the creator must delete the group instead.
    pub async fn leave_group(&self, group_id: i32, user_id: i32) -> Result<(), AppError> {
        let repo = ActivityGroupRepository::new(self.db);
        let group = repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

        if group.creator_id == user_id {
            return Err(AppError::Conflict(
                "The group creator cannot leave; delete the group instead".to_string(),
            ));
        }

        if !repo.is_member(group_id, user_id).await? {
            return Err(AppError::Conflict(
                "User is not a member of this group".to_string(),
            ));
        }

        repo.remove_member(group_id, user_id).await?;

        Ok(())
    }

    /// Partially updates the group; creator-only. `None` request fields
    /// leave existing values unchanged.
    pub async fn update_group(
        &self,
        group_id: i32,
        acting_user_id: i32,
        params: UpdateGroupParams,
    ) -> Result<GroupOverview, AppError> {
        let repo = ActivityGroupRepository::new(self.db);
        let group = repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

        if group.creator_id != acting_user_id {
            return Err(AppError::Forbidden(
                "Only the group creator can update the group".to_string(),
            ));
        }

        if let Some(new_name) = &params.name {
            if *new_name != group.name && repo.name_exists(new_name).await? {
                return Err(AppError::Conflict(
                    "A group with this name already exists".to_string(),
                ));
            }
        }

        let updated = repo.update_partial(group_id, params).await?;

        self.to_overview(updated, acting_user_id).await
    }

    /// Deletes the group with its memberships, chat and blog content;
    /// creator-only.
    pub async fn delete_group(&self, group_id: i32, acting_user_id: i32) -> Result<(), AppError> {
        let repo = ActivityGroupRepository::new(self.db);
        let group = repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

        if group.creator_id != acting_user_id {
            return Err(AppError::Forbidden(
                "Only the group creator can delete the group".to_string(),
            ));
        }

        GroupChatRepository::new(self.db)
            .delete_for_group(group_id)
            .await?;
        GroupBlogRepository::new(self.db)
            .delete_for_group(group_id)
            .await?;
        repo.remove_all_members(group_id).await?;
        repo.delete(group_id).await?;

        Ok(())
    }

    async fn to_overview(
        &self,
        group: ActivityGroup,
        viewer_id: i32,
    ) -> Result<GroupOverview, AppError> {
        let repo = ActivityGroupRepository::new(self.db);
        let member_count = repo.member_count(group.id).await?;
        let is_member = repo.is_member(group.id, viewer_id).await?;

        Ok(GroupOverview {
            group,
            member_count,
            is_member,
        })
    }

    async fn to_overviews(
        &self,
        groups: Vec<ActivityGroup>,
        viewer_id: i32,
    ) -> Result<Vec<GroupOverview>, AppError> {
        let mut overviews = Vec::with_capacity(groups.len());
        for group in groups {
            overviews.push(self.to_overview(group, viewer_id).await?);
        }

        Ok(overviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{
        builder::TestBuilder,
        factory::{group::ActivityGroupFactory, user::create_user},
    };

    fn create_params(creator_id: i32, name: &str, max_members: Option<i32>) -> CreateGroupParams {
        CreateGroupParams {
            name: name.to_string(),
            icon: "🥾".to_string(),
            color: "#3b82f6".to_string(),
            description: Some("Weekend trips".to_string()),
            category: "HIKING".to_string(),
            max_members,
            is_private: false,
            creator_id,
        }
    }

    #[tokio::test]
    async fn create_group_makes_creator_first_member() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();

        let service = ActivityGroupService::new(db);
        let overview = service
            .create_group(create_params(creator.id, "Ridge Walkers", None))
            .await
            .unwrap();

        assert_eq!(overview.member_count, 1);
        assert!(overview.is_member);
        assert_eq!(overview.group.creator_id, creator.id);
    }

    #[tokio::test]
    async fn create_group_rejects_duplicate_name() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();

        let service = ActivityGroupService::new(db);
        service
            .create_group(create_params(creator.id, "Ridge Walkers", None))
            .await
            .unwrap();

        let again = service
            .create_group(create_params(creator.id, "Ridge Walkers", None))
            .await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn join_group_rejects_existing_member() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        let group = ActivityGroupFactory::new(db, creator.id).build().await.unwrap();

        let service = ActivityGroupService::new(db);
        let result = service.join_group(group.id, creator.id).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    /// A group with max_members = 1 is full with just its creator.
    #[tokio::test]
    async fn join_group_rejects_when_full() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        let joiner = create_user(db).await.unwrap();
        let group = ActivityGroupFactory::new(db, creator.id)
            .max_members(1)
            .build()
            .await
            .unwrap();

        let service = ActivityGroupService::new(db);
        let result = service.join_group(group.id, joiner.id).await;

        match result {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, "Group is full"),
            other => panic!("expected Conflict, got {:?}", other.map(|o| o.member_count)),
        }
    }

    #[tokio::test]
    async fn join_group_increments_member_count() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        let joiner = create_user(db).await.unwrap();
        let group = ActivityGroupFactory::new(db, creator.id)
            .max_members(5)
            .build()
            .await
            .unwrap();

        let service = ActivityGroupService::new(db);
        let overview = service.join_group(group.id, joiner.id).await.unwrap();

        assert_eq!(overview.member_count, 2);
        assert!(overview.is_member);
    }

    /// The creator can never leave, whatever the group size.
    #[tokio::test]
    async fn leave_group_always_rejects_creator() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        let other = create_user(db).await.unwrap();
        let group = ActivityGroupFactory::new(db, creator.id).build().await.unwrap();

        let service = ActivityGroupService::new(db);
        service.join_group(group.id, other.id).await.unwrap();

        let result = service.leave_group(group.id, creator.id).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        // Other members can leave normally.
        service.leave_group(group.id, other.id).await.unwrap();
    }

    #[tokio::test]
    async fn leave_group_rejects_non_member() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        let stranger = create_user(db).await.unwrap();
        let group = ActivityGroupFactory::new(db, creator.id).build().await.unwrap();

        let service = ActivityGroupService::new(db);
        let result = service.leave_group(group.id, stranger.id).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn update_group_is_creator_only_and_partial() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        let other = create_user(db).await.unwrap();
        let group = ActivityGroupFactory::new(db, creator.id)
            .name("Old Name")
            .build()
            .await
            .unwrap();

        let service = ActivityGroupService::new(db);

        let by_other = service
            .update_group(
                group.id,
                other.id,
                UpdateGroupParams {
                    name: Some("Hijacked".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(by_other, Err(AppError::Forbidden(_))));

        let updated = service
            .update_group(
                group.id,
                creator.id,
                UpdateGroupParams {
                    description: Some("New description".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Untouched fields keep their values.
        assert_eq!(updated.group.name, "Old Name");
        assert_eq!(
            updated.group.description.as_deref(),
            Some("New description")
        );
    }

    #[tokio::test]
    async fn delete_group_removes_membership_rows() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        let group = ActivityGroupFactory::new(db, creator.id).build().await.unwrap();

        let service = ActivityGroupService::new(db);
        service.delete_group(group.id, creator.id).await.unwrap();

        let repo = ActivityGroupRepository::new(db);
        assert!(repo.find_by_id(group.id).await.unwrap().is_none());
        assert_eq!(repo.member_count(group.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn search_groups_honors_category_sentinel() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        ActivityGroupFactory::new(db, creator.id)
            .name("Coastal Cyclists")
            .category("CYCLING")
            .build()
            .await
            .unwrap();
        ActivityGroupFactory::new(db, creator.id)
            .name("Coastal Hikers")
            .category("HIKING")
            .build()
            .await
            .unwrap();

        let service = ActivityGroupService::new(db);

        let all = service
            .search_groups("coastal", Some("ALL"), creator.id)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let cycling = service
            .search_groups("coastal", Some("CYCLING"), creator.id)
            .await
            .unwrap();
        assert_eq!(cycling.len(), 1);
        assert_eq!(cycling[0].group.name, "Coastal Cyclists");
    }
}

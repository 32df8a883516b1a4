//! Profile reads and updates, plus admin-only account removal.
//!
//! Account removal performs the dependent-row cleanup explicitly, in one
//! ownership direction: messages, friendships, notifications, memberships,
//! reset tokens, shares, owned routes, created groups and authored content
//! go before the user row itself.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        direct_message::DirectMessageRepository, friendship::FriendshipRepository,
        group::ActivityGroupRepository, group_blog::GroupBlogRepository,
        group_chat::GroupChatRepository, notification::NotificationRepository,
        password_reset_token::PasswordResetTokenRepository, route::RouteRepository,
        site_blog::SiteBlogRepository, user::UserRepository,
    },
    error::AppError,
    model::user::{UpdateProfileParams, User, UserProfile},
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Profile of the given user with their friend and group counts.
    pub async fn profile(&self, user_id: i32) -> Result<UserProfile, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let friend_count = FriendshipRepository::new(self.db)
            .count_accepted(user_id)
            .await?;
        let group_count = ActivityGroupRepository::new(self.db)
            .count_groups_for_user(user_id)
            .await?;

        Ok(UserProfile {
            user,
            friend_count,
            group_count,
        })
    }

    /// Applies a partial profile update and returns the fresh profile.
    pub async fn update_profile(
        &self,
        user_id: i32,
        params: UpdateProfileParams,
    ) -> Result<UserProfile, AppError> {
        UserRepository::new(self.db)
            .update_profile(user_id, params)
            .await?;

        self.profile(user_id).await
    }

    /// Deletes a user account; admin-only.
    ///
    /// Removes dependent rows explicitly before the user row: direct
    /// messages, friendships, notifications, reset tokens, incoming route
    /// shares, owned routes, group memberships, authored chat/blog content
    /// and groups the user created.
    pub async fn delete_user(&self, acting_user: &User, target_id: i32) -> Result<(), AppError> {
        if !acting_user.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can delete user accounts".to_string(),
            ));
        }

        let users = UserRepository::new(self.db);
        users
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        DirectMessageRepository::new(self.db)
            .delete_for_user(target_id)
            .await?;
        FriendshipRepository::new(self.db)
            .delete_for_user(target_id)
            .await?;
        NotificationRepository::new(self.db)
            .delete_for_user(target_id)
            .await?;
        PasswordResetTokenRepository::new(self.db)
            .delete_for_user(target_id)
            .await?;

        let routes = RouteRepository::new(self.db);
        routes.remove_shares_for_user(target_id).await?;
        for route in routes.for_owner(target_id).await? {
            routes.remove_shares_for_route(route.id).await?;
            routes.delete(route.id).await?;
        }

        let groups = ActivityGroupRepository::new(self.db);
        let chats = GroupChatRepository::new(self.db);
        let blogs = GroupBlogRepository::new(self.db);

        chats.delete_for_author(target_id).await?;
        blogs.delete_for_author(target_id).await?;
        SiteBlogRepository::new(self.db)
            .delete_by_author(target_id)
            .await?;

        // Groups the user created go with the account; memberships elsewhere
        // are simply dropped.
        for group in groups.created_by(target_id).await? {
            chats.delete_for_group(group.id).await?;
            blogs.delete_for_group(group.id).await?;
            groups.remove_all_members(group.id).await?;
            groups.delete(group.id).await?;
        }
        groups.remove_memberships_for_user(target_id).await?;

        users.delete(target_id).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::UpdateProfileDto;
    use entity::prelude::*;
    use test_utils::{
        builder::TestBuilder,
        factory::{
            direct_message::DirectMessageFactory, friendship::create_accepted_friendship,
            group::ActivityGroupFactory, user::create_user, user::UserFactory,
        },
    };

    #[tokio::test]
    async fn profile_reports_friend_and_group_counts() {
        let test = TestBuilder::new()
            .with_social_tables()
            .with_table(ActivityGroup)
            .with_table(GroupMember)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let me = create_user(db).await.unwrap();
        let friend = create_user(db).await.unwrap();
        create_accepted_friendship(db, me.id, friend.id).await.unwrap();
        ActivityGroupFactory::new(db, me.id).build().await.unwrap();

        let service = UserService::new(db);
        let profile = service.profile(me.id).await.unwrap();

        assert_eq!(profile.friend_count, 1);
        assert_eq!(profile.group_count, 1);
    }

    #[tokio::test]
    async fn update_profile_preserves_absent_fields() {
        let test = TestBuilder::new()
            .with_social_tables()
            .with_table(ActivityGroup)
            .with_table(GroupMember)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let user = UserFactory::new(db)
            .display_name("Original")
            .bio("Old bio")
            .build()
            .await
            .unwrap();

        let params = UpdateProfileParams::from_dto(UpdateProfileDto {
            name: None,
            bio: Some("  New bio  ".to_string()),
            avatar_url: None,
        });

        let service = UserService::new(db);
        let profile = service.update_profile(user.id, params).await.unwrap();

        assert_eq!(profile.user.name, "Original");
        assert_eq!(profile.user.bio.as_deref(), Some("New bio"));
    }

    #[tokio::test]
    async fn delete_user_is_admin_only_and_cleans_up() {
        let test = TestBuilder::new()
            .with_messaging_tables()
            .with_table(ActivityGroup)
            .with_table(GroupMember)
            .with_table(GroupChatMessage)
            .with_table(GroupBlogPost)
            .with_table(Route)
            .with_table(RouteShare)
            .with_table(SiteBlog)
            .with_table(PasswordResetToken)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let admin_user = UserFactory::new(db).role("ADMIN").build().await.unwrap();
        let admin = UserRepository::new(db)
            .find_by_id(admin_user.id)
            .await
            .unwrap()
            .unwrap();
        let target = create_user(db).await.unwrap();
        let other = create_user(db).await.unwrap();

        create_accepted_friendship(db, target.id, other.id).await.unwrap();
        DirectMessageFactory::new(db, target.id, other.id)
            .build()
            .await
            .unwrap();

        let service = UserService::new(db);

        let not_admin = UserRepository::new(db)
            .find_by_id(other.id)
            .await
            .unwrap()
            .unwrap();
        let refused = service.delete_user(&not_admin, target.id).await;
        assert!(matches!(refused, Err(AppError::Forbidden(_))));

        service.delete_user(&admin, target.id).await.unwrap();

        assert!(UserRepository::new(db)
            .find_by_id(target.id)
            .await
            .unwrap()
            .is_none());
        assert!(FriendshipRepository::new(db)
            .find_between(target.id, other.id)
            .await
            .unwrap()
            .is_none());
        assert!(DirectMessageRepository::new(db)
            .conversation_partner_ids(other.id)
            .await
            .unwrap()
            .is_empty());
    }
}

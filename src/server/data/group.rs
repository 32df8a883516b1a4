//! Activity group data repository for database operations.
//!
//! This module provides the `ActivityGroupRepository` for group records and
//! their membership set. Group creation inserts the group and the creator's
//! membership in a single transaction so the creator is always a member.

use chrono::Utc;
use sea_orm::{
    sea_query::Func, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::model::group::{ActivityGroup, CreateGroupParams, UpdateGroupParams};

/// Repository providing database operations for activity groups and
/// memberships.
pub struct ActivityGroupRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActivityGroupRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a group and its creator's membership atomically.
    ///
    /// # Arguments
    /// - `param` - Group fields plus the creating user's id
    ///
    /// # Returns
    /// - `Ok(ActivityGroup)` - The created group with generated id
    /// - `Err(DbErr)` - Insert failure; neither row is persisted
    pub async fn create_with_creator(
        &self,
        param: CreateGroupParams,
    ) -> Result<ActivityGroup, DbErr> {
        let txn = self.db.begin().await?;

        let group = entity::activity_group::ActiveModel {
            name: ActiveValue::Set(param.name),
            icon: ActiveValue::Set(param.icon),
            color: ActiveValue::Set(param.color),
            description: ActiveValue::Set(param.description),
            category: ActiveValue::Set(param.category),
            max_members: ActiveValue::Set(param.max_members),
            is_private: ActiveValue::Set(param.is_private),
            creator_id: ActiveValue::Set(param.creator_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        entity::group_member::ActiveModel {
            group_id: ActiveValue::Set(group.id),
            user_id: ActiveValue::Set(param.creator_id),
            joined_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(ActivityGroup::from_entity(group))
    }

    /// Finds a group by primary key.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<ActivityGroup>, DbErr> {
        let entity = entity::prelude::ActivityGroup::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(ActivityGroup::from_entity))
    }

    /// Checks whether a group with the given name already exists.
    pub async fn name_exists(&self, name: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::ActivityGroup::find()
            .filter(entity::activity_group::Column::Name.eq(name))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// All groups, ordered by name.
    pub async fn all(&self) -> Result<Vec<ActivityGroup>, DbErr> {
        let entities = entity::prelude::ActivityGroup::find()
            .order_by_asc(entity::activity_group::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(ActivityGroup::from_entity)
            .collect())
    }

    /// Groups the user is a member of.
    pub async fn for_user(&self, user_id: i32) -> Result<Vec<ActivityGroup>, DbErr> {
        let memberships = entity::prelude::GroupMember::find()
            .filter(entity::group_member::Column::UserId.eq(user_id))
            .all(self.db)
            .await?;

        let group_ids: Vec<i32> = memberships.into_iter().map(|m| m.group_id).collect();
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::ActivityGroup::find()
            .filter(entity::activity_group::Column::Id.is_in(group_ids))
            .order_by_asc(entity::activity_group::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(ActivityGroup::from_entity)
            .collect())
    }

    /// Case-insensitive substring search over name and description, with an
    /// optional exact category filter.
    ///
    /// # Arguments
    /// - `query` - Substring to match; empty matches everything
    /// - `category` - `Some` restricts to that exact category
    pub async fn search(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> Result<Vec<ActivityGroup>, DbErr> {
        let pattern = format!("%{}%", query.to_lowercase());

        let mut finder = entity::prelude::ActivityGroup::find().filter(
            Condition::any()
                .add(
                    sea_orm::sea_query::Expr::expr(Func::lower(sea_orm::sea_query::Expr::col(
                        entity::activity_group::Column::Name,
                    )))
                    .like(&pattern),
                )
                .add(
                    sea_orm::sea_query::Expr::expr(Func::lower(sea_orm::sea_query::Expr::col(
                        entity::activity_group::Column::Description,
                    )))
                    .like(&pattern),
                ),
        );

        if let Some(category) = category {
            finder = finder.filter(entity::activity_group::Column::Category.eq(category));
        }

        let entities = finder
            .order_by_asc(entity::activity_group::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(ActivityGroup::from_entity)
            .collect())
    }

    /// Applies a partial update; `None` fields keep their stored values.
    ///
    /// # Returns
    /// - `Ok(ActivityGroup)` - The updated group
    /// - `Err(DbErr::RecordNotFound)` - No group with that id
    pub async fn update_partial(
        &self,
        id: i32,
        param: UpdateGroupParams,
    ) -> Result<ActivityGroup, DbErr> {
        let entity = entity::prelude::ActivityGroup::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Group with id {} not found",
                id
            )))?;

        let mut active_model: entity::activity_group::ActiveModel = entity.into();
        if let Some(name) = param.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(icon) = param.icon {
            active_model.icon = ActiveValue::Set(icon);
        }
        if let Some(color) = param.color {
            active_model.color = ActiveValue::Set(color);
        }
        if let Some(description) = param.description {
            active_model.description = ActiveValue::Set(Some(description));
        }
        if let Some(category) = param.category {
            active_model.category = ActiveValue::Set(category);
        }
        if let Some(max_members) = param.max_members {
            active_model.max_members = ActiveValue::Set(Some(max_members));
        }
        if let Some(is_private) = param.is_private {
            active_model.is_private = ActiveValue::Set(is_private);
        }

        let entity = active_model.update(self.db).await?;

        Ok(ActivityGroup::from_entity(entity))
    }

    /// Deletes the group row. Memberships, chat and blog rows are removed
    /// beforehand by the service.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::ActivityGroup::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    // ---- membership ----

    /// Checks whether the user currently belongs to the group.
    pub async fn is_member(&self, group_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::GroupMember::find()
            .filter(entity::group_member::Column::GroupId.eq(group_id))
            .filter(entity::group_member::Column::UserId.eq(user_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Current member count of the group.
    pub async fn member_count(&self, group_id: i32) -> Result<u64, DbErr> {
        entity::prelude::GroupMember::find()
            .filter(entity::group_member::Column::GroupId.eq(group_id))
            .count(self.db)
            .await
    }

    /// Membership rows of the group, oldest joiner first.
    pub async fn memberships(
        &self,
        group_id: i32,
    ) -> Result<Vec<entity::group_member::Model>, DbErr> {
        entity::prelude::GroupMember::find()
            .filter(entity::group_member::Column::GroupId.eq(group_id))
            .order_by_asc(entity::group_member::Column::JoinedAt)
            .all(self.db)
            .await
    }

    /// Inserts a membership row.
    pub async fn add_member(&self, group_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::group_member::ActiveModel {
            group_id: ActiveValue::Set(group_id),
            user_id: ActiveValue::Set(user_id),
            joined_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Removes a membership row.
    pub async fn remove_member(&self, group_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::GroupMember::delete_many()
            .filter(entity::group_member::Column::GroupId.eq(group_id))
            .filter(entity::group_member::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Number of groups the user belongs to, shown on the profile page.
    pub async fn count_groups_for_user(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::GroupMember::find()
            .filter(entity::group_member::Column::UserId.eq(user_id))
            .count(self.db)
            .await
    }

    /// Removes every membership row of the group.
    pub async fn remove_all_members(&self, group_id: i32) -> Result<(), DbErr> {
        entity::prelude::GroupMember::delete_many()
            .filter(entity::group_member::Column::GroupId.eq(group_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Removes the user's memberships across all groups. Used during account
    /// removal.
    pub async fn remove_memberships_for_user(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::GroupMember::delete_many()
            .filter(entity::group_member::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Groups created by the user. Used during account removal, where the
    /// creator's groups are deleted with the account.
    pub async fn created_by(&self, user_id: i32) -> Result<Vec<ActivityGroup>, DbErr> {
        let entities = entity::prelude::ActivityGroup::find()
            .filter(entity::activity_group::Column::CreatorId.eq(user_id))
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(ActivityGroup::from_entity)
            .collect())
    }
}

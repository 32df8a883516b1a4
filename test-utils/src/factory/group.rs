//! Activity group factory plus a membership helper.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating activity groups with customizable fields.
///
/// The creator id is mandatory. Note that only the group row is inserted;
/// call [`add_member`] to create membership rows (the service layer does both
/// in one transaction, the factory keeps them separate for fine-grained
/// tests).
pub struct ActivityGroupFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    icon: String,
    color: String,
    description: Option<String>,
    category: String,
    max_members: Option<i32>,
    is_private: bool,
    creator_id: i32,
}

impl<'a> ActivityGroupFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults: name `"Group {id}"`, hiking icon/color/category, no member
    /// limit, public.
    pub fn new(db: &'a DatabaseConnection, creator_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Group {}", id),
            icon: "⛰️".to_string(),
            color: "#10b981".to_string(),
            description: Some("A group for weekend trips".to_string()),
            category: "HIKING".to_string(),
            max_members: None,
            is_private: false,
            creator_id,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn max_members(mut self, max_members: i32) -> Self {
        self.max_members = Some(max_members);
        self
    }

    pub fn is_private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    /// Builds and inserts the group row, plus the creator's membership.
    pub async fn build(self) -> Result<entity::activity_group::Model, DbErr> {
        let group = entity::activity_group::ActiveModel {
            name: ActiveValue::Set(self.name),
            icon: ActiveValue::Set(self.icon),
            color: ActiveValue::Set(self.color),
            description: ActiveValue::Set(self.description),
            category: ActiveValue::Set(self.category),
            max_members: ActiveValue::Set(self.max_members),
            is_private: ActiveValue::Set(self.is_private),
            creator_id: ActiveValue::Set(self.creator_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        add_member(self.db, group.id, self.creator_id).await?;

        Ok(group)
    }
}

/// Inserts a membership row for the given group and user.
pub async fn add_member(
    db: &DatabaseConnection,
    group_id: i32,
    user_id: i32,
) -> Result<entity::group_member::Model, DbErr> {
    entity::group_member::ActiveModel {
        group_id: ActiveValue::Set(group_id),
        user_id: ActiveValue::Set(user_id),
        joined_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

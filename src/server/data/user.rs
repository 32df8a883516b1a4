//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records in the
//! database. It handles user creation, lookups by id/email, profile updates,
//! and the case-insensitive search behind the friend finder, with conversion
//! between entity models and domain models at the infrastructure boundary.

use chrono::Utc;
use sea_orm::{
    sea_query::Func, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, QuerySelect,
};

use crate::server::model::user::{NewUserParams, UpdateProfileParams, User};

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new user.
    ///
    /// The caller is responsible for the duplicate-email pre-check; the
    /// unique column constraint is the storage-level backstop.
    ///
    /// # Arguments
    /// - `param` - Name, email, password hash and public id for the new user
    ///
    /// # Returns
    /// - `Ok(User)` - The created user with generated id
    /// - `Err(DbErr)` - Database error during insert (including unique violations)
    pub async fn create(&self, param: NewUserParams) -> Result<User, DbErr> {
        let entity = entity::user::ActiveModel {
            email: ActiveValue::Set(param.email),
            display_name: ActiveValue::Set(param.name),
            password_hash: ActiveValue::Set(param.password_hash),
            role: ActiveValue::Set("USER".to_string()),
            is_active: ActiveValue::Set(true),
            bio: ActiveValue::Set(None),
            avatar_url: ActiveValue::Set(None),
            public_id: ActiveValue::Set(param.public_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by primary key.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by email address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Checks whether a user with the given email already exists.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Loads several users by id.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(User::from_entity).collect())
    }

    /// Case-insensitive substring search over name, email and public id.
    ///
    /// Excludes every id in `exclude_ids` (the caller passes self plus
    /// existing friends) and bounds the result size.
    ///
    /// # Arguments
    /// - `query` - Lowercased substring to match
    /// - `exclude_ids` - User ids to omit from the results
    /// - `limit` - Maximum number of rows returned
    ///
    /// # Returns
    /// - `Ok(Vec<User>)` - Matching users, at most `limit`
    /// - `Err(DbErr)` - Database error during query
    pub async fn search(
        &self,
        query: &str,
        exclude_ids: &[i32],
        limit: u64,
    ) -> Result<Vec<User>, DbErr> {
        let pattern = format!("%{}%", query.to_lowercase());

        let matches = Condition::any()
            .add(
                sea_orm::sea_query::Expr::expr(Func::lower(sea_orm::sea_query::Expr::col(
                    entity::user::Column::DisplayName,
                )))
                .like(&pattern),
            )
            .add(
                sea_orm::sea_query::Expr::expr(Func::lower(sea_orm::sea_query::Expr::col(
                    entity::user::Column::Email,
                )))
                .like(&pattern),
            )
            .add(
                sea_orm::sea_query::Expr::expr(Func::lower(sea_orm::sea_query::Expr::col(
                    entity::user::Column::PublicId,
                )))
                .like(&pattern),
            );

        let mut finder = entity::prelude::User::find().filter(matches);

        if !exclude_ids.is_empty() {
            finder = finder.filter(entity::user::Column::Id.is_not_in(exclude_ids.to_vec()));
        }

        let entities = finder.limit(limit).all(self.db).await?;

        Ok(entities.into_iter().map(User::from_entity).collect())
    }

    /// Applies a partial profile update; `None` fields keep their stored
    /// values.
    ///
    /// # Returns
    /// - `Ok(User)` - The updated user
    /// - `Err(DbErr::RecordNotFound)` - No user with that id
    pub async fn update_profile(
        &self,
        id: i32,
        param: UpdateProfileParams,
    ) -> Result<User, DbErr> {
        let entity = entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "User with id {} not found",
                id
            )))?;

        let mut active_model: entity::user::ActiveModel = entity.into();
        if let Some(name) = param.name {
            active_model.display_name = ActiveValue::Set(name);
        }
        if let Some(bio) = param.bio {
            active_model.bio = ActiveValue::Set(Some(bio));
        }
        if let Some(avatar_url) = param.avatar_url {
            active_model.avatar_url = ActiveValue::Set(Some(avatar_url));
        }

        let entity = active_model.update(self.db).await?;

        Ok(User::from_entity(entity))
    }

    /// Replaces the stored password hash.
    pub async fn set_password_hash(&self, id: i32, password_hash: String) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes the user row itself. Dependent rows are removed beforehand by
    /// the service-level cleanup.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(())
    }
}

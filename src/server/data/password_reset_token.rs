//! Password reset token data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::reset_token::PasswordResetToken;

/// Repository providing database operations for password reset tokens.
pub struct PasswordResetTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PasswordResetTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a new unused token.
    pub async fn create(
        &self,
        user_id: i32,
        code: String,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetToken, DbErr> {
        let entity = entity::password_reset_token::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            code: ActiveValue::Set(code),
            expires_at: ActiveValue::Set(expires_at),
            used: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(PasswordResetToken::from_entity(entity))
    }

    /// Finds the token row matching user and code, whatever its state.
    /// Validity (unused, unexpired) is judged by the caller.
    pub async fn find_by_user_and_code(
        &self,
        user_id: i32,
        code: &str,
    ) -> Result<Option<PasswordResetToken>, DbErr> {
        let entity = entity::prelude::PasswordResetToken::find()
            .filter(entity::password_reset_token::Column::UserId.eq(user_id))
            .filter(entity::password_reset_token::Column::Code.eq(code))
            .one(self.db)
            .await?;

        Ok(entity.map(PasswordResetToken::from_entity))
    }

    /// Marks every outstanding token of the user as used, so only the newest
    /// requested code stays redeemable.
    pub async fn invalidate_all_for_user(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::PasswordResetToken::update_many()
            .filter(entity::password_reset_token::Column::UserId.eq(user_id))
            .filter(entity::password_reset_token::Column::Used.eq(false))
            .col_expr(
                entity::password_reset_token::Column::Used,
                sea_orm::sea_query::Expr::value(true),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Marks a token as consumed. Single use is enforced through this flag,
    /// not by deletion.
    pub async fn mark_used(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::PasswordResetToken::update_many()
            .filter(entity::password_reset_token::Column::Id.eq(id))
            .col_expr(
                entity::password_reset_token::Column::Used,
                sea_orm::sea_query::Expr::value(true),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes every token that expired before `now`. Called by the cleanup
    /// scheduler.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::PasswordResetToken::delete_many()
            .filter(entity::password_reset_token::Column::ExpiresAt.lt(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes every token of the user. Used during account removal.
    pub async fn delete_for_user(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::PasswordResetToken::delete_many()
            .filter(entity::password_reset_token::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}

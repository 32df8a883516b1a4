//! Password reset token factory.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating password reset tokens.
///
/// Defaults to an unused `"123456"` code that expires 15 minutes from now.
pub struct PasswordResetTokenFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    code: String,
    expires_at: DateTime<Utc>,
    used: bool,
}

impl<'a> PasswordResetTokenFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            code: "123456".to_string(),
            expires_at: Utc::now() + Duration::minutes(15),
            used: false,
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn used(mut self, used: bool) -> Self {
        self.used = used;
        self
    }

    /// Builds and inserts the token row.
    pub async fn build(self) -> Result<entity::password_reset_token::Model, DbErr> {
        entity::password_reset_token::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            code: ActiveValue::Set(self.code),
            expires_at: ActiveValue::Set(self.expires_at),
            used: ActiveValue::Set(self.used),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

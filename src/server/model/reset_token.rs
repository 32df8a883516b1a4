//! Password reset token domain model.

use chrono::{DateTime, Utc};

/// A single-use 6-digit reset code with a 15-minute lifetime. Consumption is
/// tracked through the `used` flag rather than deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordResetToken {
    pub id: i32,
    pub user_id: i32,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    pub fn from_entity(entity: entity::password_reset_token::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            code: entity.code,
            expires_at: entity.expires_at,
            used: entity.used,
            created_at: entity.created_at,
        }
    }

    /// A token is live when it is unused and unexpired.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.used && self.expires_at > now
    }
}

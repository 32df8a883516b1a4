//! Registration, login and the password-reset-token lifecycle.
//!
//! Passwords are stored as bcrypt digests. Session tokens are signed by the
//! [`TokenService`]; registration and login issue tokens of identical shape.
//! Reset codes are 6-digit, single-use and expire after 15 minutes.

use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{password_reset_token::PasswordResetTokenRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::user::{NewUserParams, User},
    service::{email::EmailService, token::TokenService},
};

/// Reset code lifetime.
const RESET_TOKEN_TTL_MINUTES: i64 = 15;

/// A signed session token together with the authenticated user.
pub struct AuthenticatedSession {
    pub token: String,
    pub user: User,
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService) -> Self {
        Self { db, tokens }
    }

    /// Registers a new account and issues a session token.
    ///
    /// # Returns
    /// - `Ok(AuthenticatedSession)` - Token and the stored user
    /// - `Err(AppError::Conflict)` - Email already registered
    /// - `Err(AppError::BadRequest)` - Blank name, email or password
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, AppError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::BadRequest(
                "Name, email and password are required".to_string(),
            ));
        }

        let users = UserRepository::new(self.db);
        if users.email_exists(email).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
        let user = users
            .create(NewUserParams {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                public_id: Uuid::new_v4().to_string(),
            })
            .await?;

        let token = self.tokens.issue(&user)?;

        Ok(AuthenticatedSession { token, user })
    }

    /// Verifies credentials and issues a session token.
    ///
    /// The failure message never distinguishes an unknown email from a wrong
    /// password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedSession, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_email(email.trim())
            .await?
            .ok_or(AuthError::WrongCredentials)?;

        if !bcrypt::verify(password, &user.password_hash)? {
            return Err(AuthError::WrongCredentials.into());
        }

        if !user.is_active {
            return Err(AuthError::AccountDisabled(user.id).into());
        }

        let token = self.tokens.issue(&user)?;

        Ok(AuthenticatedSession { token, user })
    }

    /// Starts a password reset: invalidates prior codes, stores a fresh
    /// 6-digit code with a 15-minute expiry and attempts email delivery.
    ///
    /// Delivery is fire-and-forget; the token row id is returned regardless
    /// of the email outcome.
    pub async fn request_password_reset(
        &self,
        email: &str,
        mailer: &EmailService,
    ) -> Result<i32, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("No account with that email".to_string()))?;

        let resets = PasswordResetTokenRepository::new(self.db);
        resets.invalidate_all_for_user(user.id).await?;

        let code = format!("{:06}", rand::rng().random_range(0..1_000_000));
        let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);
        let token = resets.create(user.id, code.clone(), expires_at).await?;

        mailer.send_password_reset(user.email.clone(), user.name.clone(), code);

        Ok(token.id)
    }

    /// Checks that the code belongs to the claimed user, is unused and is
    /// unexpired.
    pub async fn verify_reset_token(&self, email: &str, code: &str) -> Result<bool, AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_email(email.trim()).await? else {
            return Ok(false);
        };

        let token = PasswordResetTokenRepository::new(self.db)
            .find_by_user_and_code(user.id, code)
            .await?;

        Ok(token.is_some_and(|t| t.is_valid_at(Utc::now())))
    }

    /// Re-verifies the code, stores the re-hashed password and consumes the
    /// token. A second use of the same code fails.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if new_password.is_empty() {
            return Err(AppError::BadRequest("Password is required".to_string()));
        }

        let users = UserRepository::new(self.db);
        let user = users
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("No account with that email".to_string()))?;

        let resets = PasswordResetTokenRepository::new(self.db);
        let token = resets
            .find_by_user_and_code(user.id, code)
            .await?
            .filter(|t| t.is_valid_at(Utc::now()))
            .ok_or_else(|| AppError::Conflict("Invalid or expired reset code".to_string()))?;

        let password_hash = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)?;
        users.set_password_hash(user.id, password_hash).await?;
        resets.mark_used(token.id).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::prelude::{PasswordResetToken, User as UserTable};
    use test_utils::{
        builder::TestBuilder, factory::password_reset_token::PasswordResetTokenFactory,
        factory::user::create_user,
    };

    fn token_service() -> TokenService {
        TokenService::new("test-secret")
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let test = TestBuilder::new().with_table(UserTable).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let tokens = token_service();

        let service = AuthService::new(db, &tokens);
        service
            .register("Ada", "ada@example.com", "correct horse")
            .await
            .unwrap();

        let again = service
            .register("Other Ada", "ada@example.com", "battery staple")
            .await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn register_then_login_round_trips() {
        let test = TestBuilder::new().with_table(UserTable).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let tokens = token_service();

        let service = AuthService::new(db, &tokens);
        let registered = service
            .register("Ada", "ada@example.com", "correct horse")
            .await
            .unwrap();

        // The issued token verifies and is bound to the new user's identity.
        let claims = tokens.verify(&registered.token).unwrap();
        assert_eq!(claims.sub, registered.user.id);

        let session = service.login("ada@example.com", "correct horse").await.unwrap();
        assert_eq!(session.user.id, registered.user.id);

        let wrong = service.login("ada@example.com", "wrong password").await;
        assert!(matches!(wrong, Err(AppError::AuthErr(AuthError::WrongCredentials))));
    }

    #[tokio::test]
    async fn reset_password_consumes_the_token_exactly_once() {
        let test = TestBuilder::new()
            .with_table(UserTable)
            .with_table(PasswordResetToken)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let tokens = token_service();

        let service = AuthService::new(db, &tokens);
        let registered = service
            .register("Ada", "ada@example.com", "old password")
            .await
            .unwrap();

        PasswordResetTokenFactory::new(db, registered.user.id)
            .code("654321")
            .build()
            .await
            .unwrap();

        assert!(service
            .verify_reset_token("ada@example.com", "654321")
            .await
            .unwrap());

        service
            .reset_password("ada@example.com", "654321", "new password")
            .await
            .unwrap();

        // The new password works, the old one does not.
        service.login("ada@example.com", "new password").await.unwrap();
        assert!(service.login("ada@example.com", "old password").await.is_err());

        // Single use: the same code is now rejected.
        let again = service
            .reset_password("ada@example.com", "654321", "another password")
            .await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
        assert!(!service
            .verify_reset_token("ada@example.com", "654321")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn expired_reset_tokens_are_rejected() {
        let test = TestBuilder::new()
            .with_table(UserTable)
            .with_table(PasswordResetToken)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let user = create_user(db).await.unwrap();

        PasswordResetTokenFactory::new(db, user.id)
            .code("111111")
            .expires_at(Utc::now() - Duration::minutes(1))
            .build()
            .await
            .unwrap();

        let tokens = token_service();
        let service = AuthService::new(db, &tokens);
        assert!(!service.verify_reset_token(&user.email, "111111").await.unwrap());
    }

    #[tokio::test]
    async fn inactive_accounts_cannot_login() {
        let test = TestBuilder::new().with_table(UserTable).build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let hash = bcrypt::hash("password", bcrypt::DEFAULT_COST).unwrap();
        let user = test_utils::factory::user::UserFactory::new(db)
            .password_hash(hash)
            .is_active(false)
            .build()
            .await
            .unwrap();

        let tokens = token_service();
        let service = AuthService::new(db, &tokens);
        let result = service.login(&user.email, "password").await;

        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::AccountDisabled(_)))
        ));
    }
}

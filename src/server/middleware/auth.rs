//! Bearer-token authentication guard.
//!
//! Every protected handler resolves the acting user through [`AuthGuard`]
//! and passes the result into service calls explicitly; there is no ambient
//! current-user context anywhere in the codebase.

use axum::http::{header, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::User,
    service::token::TokenService,
};

pub enum Permission {
    Admin,
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService, headers: &'a HeaderMap) -> Self {
        Self {
            db,
            tokens,
            headers,
        }
    }

    /// Validates the request's bearer token, loads the user and checks the
    /// required permissions.
    ///
    /// # Returns
    /// - `Ok(User)` - The acting user, to be passed into service calls
    /// - `Err(AppError::AuthErr)` - Missing/invalid token, deactivated
    ///   account, unknown subject, or missing permission
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let token = bearer_token(self.headers).ok_or(AuthError::MissingToken)?;

        authenticate_token(self.db, self.tokens, token, permissions).await
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Token validation shared by the HTTP guard and the websocket handshake,
/// which carries its token in a query parameter instead of a header.
pub async fn authenticate_token(
    db: &DatabaseConnection,
    tokens: &TokenService,
    token: &str,
    permissions: &[Permission],
) -> Result<User, AppError> {
    let claims = tokens.verify(token)?;

    let user = UserRepository::new(db)
        .find_by_id(claims.sub)
        .await?
        .ok_or(AuthError::UserNotInDatabase(claims.sub))?;

    if !user.is_active {
        return Err(AuthError::AccountDisabled(user.id).into());
    }

    for permission in permissions {
        match permission {
            Permission::Admin => {
                if !user.is_admin() {
                    return Err(AuthError::AccessDenied(
                        user.id,
                        "Admin permission required".to_string(),
                    )
                    .into());
                }
            }
        }
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory::user::UserFactory};

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let tokens = TokenService::new("secret");
        let headers = HeaderMap::new();

        let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::MissingToken))
        ));
    }

    #[tokio::test]
    async fn valid_token_resolves_the_user() {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let entity = UserFactory::new(db).build().await.unwrap();
        let user = crate::server::model::user::User::from_entity(entity);

        let tokens = TokenService::new("secret");
        let token = tokens.issue(&user).unwrap();
        let headers = headers_with(&token);

        let resolved = AuthGuard::new(db, &tokens, &headers)
            .require(&[])
            .await
            .unwrap();

        assert_eq!(resolved.id, user.id);
    }

    #[tokio::test]
    async fn admin_permission_is_enforced() {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let entity = UserFactory::new(db).build().await.unwrap();
        let user = crate::server::model::user::User::from_entity(entity);

        let tokens = TokenService::new("secret");
        let token = tokens.issue(&user).unwrap();
        let headers = headers_with(&token);

        let result = AuthGuard::new(db, &tokens, &headers)
            .require(&[Permission::Admin])
            .await;

        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
        ));
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let entity = UserFactory::new(db).build().await.unwrap();
        let user = crate::server::model::user::User::from_entity(entity);

        let tokens = TokenService::new("secret");
        let other_signer = TokenService::new("other-secret");
        let token = other_signer.issue(&user).unwrap();
        let headers = headers_with(&token);

        let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::InvalidToken))
        ));
    }
}

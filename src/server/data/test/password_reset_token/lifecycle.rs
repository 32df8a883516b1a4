use super::*;
use chrono::{Duration, Utc};
use entity::prelude::{PasswordResetToken, User};

/// Tests lookup by user and code, including the consumed flag.
#[tokio::test]
async fn find_by_user_and_code_returns_any_state() {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(PasswordResetToken)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = create_user(db).await.unwrap();

    PasswordResetTokenFactory::new(db, user.id)
        .code("123456")
        .used(true)
        .build()
        .await
        .unwrap();

    let repo = PasswordResetTokenRepository::new(db);
    let token = repo.find_by_user_and_code(user.id, "123456").await.unwrap();

    // The row is returned; validity judgement stays with the caller.
    let token = token.unwrap();
    assert!(token.used);
    assert!(!token.is_valid_at(Utc::now()));
}

/// Tests that a fresh request invalidates every outstanding code.
#[tokio::test]
async fn invalidate_all_marks_outstanding_codes_used() {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(PasswordResetToken)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = create_user(db).await.unwrap();
    let other = create_user(db).await.unwrap();

    PasswordResetTokenFactory::new(db, user.id).code("111111").build().await.unwrap();
    PasswordResetTokenFactory::new(db, user.id).code("222222").build().await.unwrap();
    PasswordResetTokenFactory::new(db, other.id).code("333333").build().await.unwrap();

    let repo = PasswordResetTokenRepository::new(db);
    repo.invalidate_all_for_user(user.id).await.unwrap();

    assert!(repo
        .find_by_user_and_code(user.id, "111111")
        .await
        .unwrap()
        .unwrap()
        .used);
    assert!(repo
        .find_by_user_and_code(user.id, "222222")
        .await
        .unwrap()
        .unwrap()
        .used);
    // Other users' tokens are untouched.
    assert!(!repo
        .find_by_user_and_code(other.id, "333333")
        .await
        .unwrap()
        .unwrap()
        .used);
}

/// Tests the scheduler's expired-token purge.
#[tokio::test]
async fn delete_expired_removes_only_stale_rows() {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(PasswordResetToken)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = create_user(db).await.unwrap();

    PasswordResetTokenFactory::new(db, user.id)
        .code("111111")
        .expires_at(Utc::now() - Duration::hours(1))
        .build()
        .await
        .unwrap();
    PasswordResetTokenFactory::new(db, user.id)
        .code("222222")
        .build()
        .await
        .unwrap();

    let repo = PasswordResetTokenRepository::new(db);
    let purged = repo.delete_expired(Utc::now()).await.unwrap();

    assert_eq!(purged, 1);
    assert!(repo
        .find_by_user_and_code(user.id, "111111")
        .await
        .unwrap()
        .is_none());
    assert!(repo
        .find_by_user_and_code(user.id, "222222")
        .await
        .unwrap()
        .is_some());
}

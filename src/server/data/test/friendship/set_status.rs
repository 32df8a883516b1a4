use super::*;
use chrono::Utc;

/// Tests the PENDING to ACCEPTED transition with timestamp stamping.
#[tokio::test]
async fn accept_stamps_accepted_at_when_given() {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let a = create_user(db).await.unwrap();
    let b = create_user(db).await.unwrap();

    let repo = FriendshipRepository::new(db);
    let friendship = repo.create_pending(a.id, b.id).await.unwrap();

    let accepted = repo
        .set_status(friendship.id, FriendshipStatus::Accepted, Some(Utc::now()))
        .await
        .unwrap();

    assert_eq!(accepted.status, FriendshipStatus::Accepted);
    assert!(accepted.accepted_at.is_some());
}

/// Tests that passing no timestamp leaves the accepted column untouched.
#[tokio::test]
async fn status_change_without_timestamp_preserves_accepted_at() {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let a = create_user(db).await.unwrap();
    let b = create_user(db).await.unwrap();

    let repo = FriendshipRepository::new(db);
    let friendship = repo.create_pending(a.id, b.id).await.unwrap();

    let rejected = repo
        .set_status(friendship.id, FriendshipStatus::Rejected, None)
        .await
        .unwrap();

    assert_eq!(rejected.status, FriendshipStatus::Rejected);
    assert!(rejected.accepted_at.is_none());
}

/// Tests the error for a missing row id.
#[tokio::test]
async fn unknown_id_is_not_found() {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = FriendshipRepository::new(db);
    let result = repo.set_status(999, FriendshipStatus::Accepted, None).await;

    assert!(matches!(
        result,
        Err(crate::server::error::AppError::NotFound(_))
    ));
}

use super::*;

/// Tests creating a fresh PENDING row.
///
/// Expected: Ok with the requester recorded as the sending side, no
/// accepted timestamp.
#[tokio::test]
async fn creates_pending_row_owned_by_requester() {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let a = create_user(db).await.unwrap();
    let b = create_user(db).await.unwrap();

    let repo = FriendshipRepository::new(db);
    let friendship = repo.create_pending(a.id, b.id).await.unwrap();

    assert_eq!(friendship.requester_id, a.id);
    assert_eq!(friendship.addressee_id, b.id);
    assert_eq!(friendship.status, FriendshipStatus::Pending);
    assert!(friendship.accepted_at.is_none());
}

/// Tests that exactly one row exists for the pair after a request.
#[tokio::test]
async fn single_row_per_pair() {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let a = create_user(db).await.unwrap();
    let b = create_user(db).await.unwrap();

    let repo = FriendshipRepository::new(db);
    repo.create_pending(a.id, b.id).await.unwrap();

    assert!(repo.exists_between(a.id, b.id).await.unwrap());
    assert!(repo.exists_between(b.id, a.id).await.unwrap());
}

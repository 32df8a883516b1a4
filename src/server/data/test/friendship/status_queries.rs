use super::*;
use chrono::Utc;

/// Tests are_friends across statuses and orientations.
#[tokio::test]
async fn are_friends_requires_accepted_status() {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let a = create_user(db).await.unwrap();
    let b = create_user(db).await.unwrap();
    let c = create_user(db).await.unwrap();

    FriendshipFactory::new(db, a.id, b.id)
        .status("ACCEPTED")
        .accepted_at(Utc::now())
        .build()
        .await
        .unwrap();
    FriendshipFactory::new(db, a.id, c.id).build().await.unwrap();

    let repo = FriendshipRepository::new(db);
    assert!(repo.are_friends(a.id, b.id).await.unwrap());
    assert!(repo.are_friends(b.id, a.id).await.unwrap());
    assert!(!repo.are_friends(a.id, c.id).await.unwrap());
}

/// Tests the per-direction pending listings.
#[tokio::test]
async fn pending_listings_split_by_direction() {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let me = create_user(db).await.unwrap();
    let sender = create_user(db).await.unwrap();
    let target = create_user(db).await.unwrap();

    FriendshipFactory::new(db, sender.id, me.id).build().await.unwrap();
    FriendshipFactory::new(db, me.id, target.id).build().await.unwrap();

    let repo = FriendshipRepository::new(db);

    let received = repo.received_pending(me.id).await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].requester_id, sender.id);

    let sent = repo.sent_pending(me.id).await.unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].addressee_id, target.id);
}

/// Tests accepted counts and friend id extraction.
#[tokio::test]
async fn accepted_counts_and_ids() {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let me = create_user(db).await.unwrap();
    let f1 = create_user(db).await.unwrap();
    let f2 = create_user(db).await.unwrap();

    // One edge in each orientation.
    FriendshipFactory::new(db, me.id, f1.id)
        .status("ACCEPTED")
        .accepted_at(Utc::now())
        .build()
        .await
        .unwrap();
    FriendshipFactory::new(db, f2.id, me.id)
        .status("ACCEPTED")
        .accepted_at(Utc::now())
        .build()
        .await
        .unwrap();

    let repo = FriendshipRepository::new(db);
    assert_eq!(repo.count_accepted(me.id).await.unwrap(), 2);

    let mut ids = repo.accepted_friend_ids(me.id).await.unwrap();
    ids.sort_unstable();
    let mut expected = vec![f1.id, f2.id];
    expected.sort_unstable();
    assert_eq!(ids, expected);
}

/// Tests the status lookup with its NONE case handled by the caller.
#[tokio::test]
async fn status_between_reads_any_row() {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let a = create_user(db).await.unwrap();
    let b = create_user(db).await.unwrap();

    let repo = FriendshipRepository::new(db);
    assert!(repo.status_between(a.id, b.id).await.unwrap().is_none());

    FriendshipFactory::new(db, a.id, b.id)
        .status("BLOCKED")
        .build()
        .await
        .unwrap();

    assert_eq!(
        repo.status_between(b.id, a.id).await.unwrap(),
        Some(FriendshipStatus::Blocked)
    );
}

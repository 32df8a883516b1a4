use super::*;

/// Tests that the pair lookup matches both orientations of the edge.
#[tokio::test]
async fn matches_both_orientations() {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let a = create_user(db).await.unwrap();
    let b = create_user(db).await.unwrap();

    let repo = FriendshipRepository::new(db);
    let created = repo.create_pending(a.id, b.id).await.unwrap();

    let forward = repo.find_between(a.id, b.id).await.unwrap().unwrap();
    let reverse = repo.find_between(b.id, a.id).await.unwrap().unwrap();

    assert_eq!(forward.id, created.id);
    assert_eq!(reverse.id, created.id);
}

/// Tests that unrelated pairs do not leak into the lookup.
#[tokio::test]
async fn returns_none_for_unrelated_pair() {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let a = create_user(db).await.unwrap();
    let b = create_user(db).await.unwrap();
    let c = create_user(db).await.unwrap();

    let repo = FriendshipRepository::new(db);
    repo.create_pending(a.id, b.id).await.unwrap();

    assert!(repo.find_between(a.id, c.id).await.unwrap().is_none());
    assert!(repo.find_between(b.id, c.id).await.unwrap().is_none());
}

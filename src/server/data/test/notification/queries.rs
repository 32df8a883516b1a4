use super::*;

/// Tests the unread listing, count, bulk marker and read purge.
#[tokio::test]
async fn unread_lifecycle() {
    let test = TestBuilder::new().with_messaging_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = create_user(db).await.unwrap();

    NotificationFactory::new(db, user.id).build().await.unwrap();
    NotificationFactory::new(db, user.id).build().await.unwrap();
    NotificationFactory::new(db, user.id).is_read(true).build().await.unwrap();

    let repo = NotificationRepository::new(db);
    assert_eq!(repo.count_unread(user.id).await.unwrap(), 2);
    assert_eq!(repo.unread_for_user(user.id).await.unwrap().len(), 2);

    repo.mark_all_read(user.id).await.unwrap();
    assert_eq!(repo.count_unread(user.id).await.unwrap(), 0);

    let deleted = repo.delete_read(user.id).await.unwrap();
    assert_eq!(deleted, 3);
    assert!(repo.for_user(user.id).await.unwrap().is_empty());
}

/// Tests that the tagged related reference round-trips through storage.
#[tokio::test]
async fn related_reference_round_trips() {
    let test = TestBuilder::new().with_messaging_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = create_user(db).await.unwrap();

    let created = NotificationFactory::new(db, user.id)
        .kind("FRIEND_REQUEST")
        .related("FRIENDSHIP", 42)
        .build()
        .await
        .unwrap();

    let repo = NotificationRepository::new(db);
    let loaded = repo.find_by_id(created.id).await.unwrap().unwrap();

    let related = loaded.related.unwrap();
    assert_eq!(related.kind, "FRIENDSHIP");
    assert_eq!(related.id, 42);
}

use super::*;

/// Tests the live unread aggregates.
#[tokio::test]
async fn counts_only_unread_rows_for_the_receiver() {
    let test = TestBuilder::new().with_messaging_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let me = create_user(db).await.unwrap();
    let x = create_user(db).await.unwrap();
    let y = create_user(db).await.unwrap();

    DirectMessageFactory::new(db, x.id, me.id).build().await.unwrap();
    DirectMessageFactory::new(db, x.id, me.id).is_read(true).build().await.unwrap();
    DirectMessageFactory::new(db, y.id, me.id).build().await.unwrap();
    // A message I sent never counts against me.
    DirectMessageFactory::new(db, me.id, x.id).build().await.unwrap();

    let repo = DirectMessageRepository::new(db);
    assert_eq!(repo.count_unread(me.id).await.unwrap(), 2);
    assert_eq!(repo.count_unread_from(me.id, x.id).await.unwrap(), 1);
    assert_eq!(repo.count_unread_from(me.id, y.id).await.unwrap(), 1);
}

/// Tests the bulk read marker: only the given sender's rows flip, and the
/// read timestamp is stamped.
#[tokio::test]
async fn mark_all_read_between_is_scoped_to_one_sender() {
    let test = TestBuilder::new().with_messaging_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let me = create_user(db).await.unwrap();
    let x = create_user(db).await.unwrap();
    let y = create_user(db).await.unwrap();

    DirectMessageFactory::new(db, x.id, me.id).build().await.unwrap();
    DirectMessageFactory::new(db, y.id, me.id).build().await.unwrap();

    let repo = DirectMessageRepository::new(db);
    repo.mark_all_read_between(me.id, x.id).await.unwrap();

    assert_eq!(repo.count_unread_from(me.id, x.id).await.unwrap(), 0);
    assert_eq!(repo.count_unread_from(me.id, y.id).await.unwrap(), 1);

    let from_x = repo.conversation_between(me.id, x.id).await.unwrap();
    assert!(from_x.iter().all(|m| m.is_read && m.read_at.is_some()));
}

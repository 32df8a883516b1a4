use super::*;

/// Tests partner extraction: distinct ids from either side of the pair
/// columns.
#[tokio::test]
async fn deduplicates_partners_across_directions() {
    let test = TestBuilder::new().with_messaging_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let me = create_user(db).await.unwrap();
    let x = create_user(db).await.unwrap();
    let y = create_user(db).await.unwrap();

    DirectMessageFactory::new(db, me.id, x.id).build().await.unwrap();
    DirectMessageFactory::new(db, x.id, me.id).build().await.unwrap();
    DirectMessageFactory::new(db, y.id, me.id).build().await.unwrap();

    let repo = DirectMessageRepository::new(db);
    let mut partners = repo.conversation_partner_ids(me.id).await.unwrap();
    partners.sort_unstable();

    let mut expected = vec![x.id, y.id];
    expected.sort_unstable();
    assert_eq!(partners, expected);
}

/// Tests the last-message lookup used by the inbox.
#[tokio::test]
async fn last_message_is_most_recent() {
    let test = TestBuilder::new().with_messaging_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let a = create_user(db).await.unwrap();
    let b = create_user(db).await.unwrap();

    let t0 = chrono::Utc::now() - chrono::Duration::minutes(10);
    DirectMessageFactory::new(db, a.id, b.id)
        .content("older")
        .created_at(t0)
        .build()
        .await
        .unwrap();
    DirectMessageFactory::new(db, b.id, a.id)
        .content("newer")
        .created_at(t0 + chrono::Duration::minutes(1))
        .build()
        .await
        .unwrap();

    let repo = DirectMessageRepository::new(db);
    let last = repo.last_message_between(a.id, b.id).await.unwrap().unwrap();

    assert_eq!(last.content, "newer");
}

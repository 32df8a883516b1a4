use super::*;
use chrono::{Duration, Utc};

/// Tests that a conversation collects both directions, oldest first.
#[tokio::test]
async fn collects_both_directions_oldest_first() {
    let test = TestBuilder::new().with_messaging_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let a = create_user(db).await.unwrap();
    let b = create_user(db).await.unwrap();

    let t0 = Utc::now() - Duration::minutes(30);
    DirectMessageFactory::new(db, a.id, b.id)
        .content("first")
        .created_at(t0)
        .build()
        .await
        .unwrap();
    DirectMessageFactory::new(db, b.id, a.id)
        .content("second")
        .created_at(t0 + Duration::minutes(5))
        .build()
        .await
        .unwrap();
    DirectMessageFactory::new(db, a.id, b.id)
        .content("third")
        .created_at(t0 + Duration::minutes(10))
        .build()
        .await
        .unwrap();

    let repo = DirectMessageRepository::new(db);
    let conversation = repo.conversation_between(a.id, b.id).await.unwrap();

    let contents: Vec<&str> = conversation.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second", "third"]);
}

/// Tests that other pairs' messages stay out of the conversation.
#[tokio::test]
async fn excludes_other_pairs() {
    let test = TestBuilder::new().with_messaging_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let a = create_user(db).await.unwrap();
    let b = create_user(db).await.unwrap();
    let c = create_user(db).await.unwrap();

    DirectMessageFactory::new(db, a.id, b.id).build().await.unwrap();
    DirectMessageFactory::new(db, a.id, c.id).build().await.unwrap();

    let repo = DirectMessageRepository::new(db);
    assert_eq!(repo.conversation_between(a.id, b.id).await.unwrap().len(), 1);
}

/// Tests deleting a whole conversation.
#[tokio::test]
async fn delete_conversation_removes_both_directions() {
    let test = TestBuilder::new().with_messaging_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let a = create_user(db).await.unwrap();
    let b = create_user(db).await.unwrap();

    DirectMessageFactory::new(db, a.id, b.id).build().await.unwrap();
    DirectMessageFactory::new(db, b.id, a.id).build().await.unwrap();

    let repo = DirectMessageRepository::new(db);
    repo.delete_conversation_between(a.id, b.id).await.unwrap();

    assert!(repo.conversation_between(a.id, b.id).await.unwrap().is_empty());
}

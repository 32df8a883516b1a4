use super::*;

/// Tests partial updates: None keeps, Some overwrites.
#[tokio::test]
async fn partial_update_semantics() {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = UserFactory::new(db)
        .display_name("Before")
        .bio("Old bio")
        .build()
        .await
        .unwrap();

    let repo = UserRepository::new(db);
    let updated = repo
        .update_profile(
            user.id,
            UpdateProfileParams {
                name: None,
                bio: Some("New bio".to_string()),
                avatar_url: Some("https://img.example/a.png".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Before");
    assert_eq!(updated.bio.as_deref(), Some("New bio"));
    assert_eq!(updated.avatar_url.as_deref(), Some("https://img.example/a.png"));
}

/// Tests the password swap used by the reset flow.
#[tokio::test]
async fn set_password_hash_replaces_digest() {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = UserFactory::new(db)
        .password_hash("old-digest")
        .build()
        .await
        .unwrap();

    let repo = UserRepository::new(db);
    repo.set_password_hash(user.id, "new-digest".to_string())
        .await
        .unwrap();

    let reloaded = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.password_hash, "new-digest");
}

use super::*;

/// Tests user creation defaults and email lookups.
#[tokio::test]
async fn creates_active_user_with_user_role() {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(NewUserParams {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "digest".to_string(),
            public_id: "pub-ada".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.role, "USER");
    assert!(user.is_active);

    assert!(repo.email_exists("ada@example.com").await.unwrap());
    let found = repo.find_by_email("ada@example.com").await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
}

/// Tests the batched id lookup with an empty input.
#[tokio::test]
async fn find_by_ids_handles_empty_slice() {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
}

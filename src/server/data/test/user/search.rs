use super::*;

/// Tests matching across name, email and public id, case-insensitively.
#[tokio::test]
async fn matches_name_email_and_public_id() {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let by_name = UserFactory::new(db)
        .display_name("Wanderer One")
        .build()
        .await
        .unwrap();
    let by_email = UserFactory::new(db)
        .email("the.wanderer@example.com")
        .build()
        .await
        .unwrap();
    UserFactory::new(db)
        .display_name("Homebody")
        .email("home@example.com")
        .build()
        .await
        .unwrap();

    let repo = UserRepository::new(db);
    let results = repo.search("WANDERER", &[], 20).await.unwrap();

    let ids: Vec<i32> = results.iter().map(|u| u.id).collect();
    assert!(ids.contains(&by_name.id));
    assert!(ids.contains(&by_email.id));
    assert_eq!(ids.len(), 2);
}

/// Tests the exclusion list and the result bound.
#[tokio::test]
async fn excludes_ids_and_respects_limit() {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut ids = Vec::new();
    for i in 0..5 {
        let user = UserFactory::new(db)
            .display_name(format!("Voyager {}", i))
            .build()
            .await
            .unwrap();
        ids.push(user.id);
    }

    let repo = UserRepository::new(db);

    let excluded = repo.search("voyager", &[ids[0], ids[1]], 20).await.unwrap();
    assert_eq!(excluded.len(), 3);

    let limited = repo.search("voyager", &[], 2).await.unwrap();
    assert_eq!(limited.len(), 2);
}

use super::*;

/// Tests case-insensitive substring matching over name and description.
#[tokio::test]
async fn matches_name_and_description_case_insensitively() {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = create_user(db).await.unwrap();

    ActivityGroupFactory::new(db, creator.id)
        .name("Sunrise Hikers")
        .description("Early morning trails")
        .build()
        .await
        .unwrap();
    ActivityGroupFactory::new(db, creator.id)
        .name("City Walkers")
        .description("We love a good SUNRISE too")
        .build()
        .await
        .unwrap();
    ActivityGroupFactory::new(db, creator.id)
        .name("Night Owls")
        .description("After dark only")
        .build()
        .await
        .unwrap();

    let repo = ActivityGroupRepository::new(db);
    let results = repo.search("sunrise", None).await.unwrap();

    assert_eq!(results.len(), 2);
}

/// Tests the exact category filter.
#[tokio::test]
async fn category_filter_is_exact() {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = create_user(db).await.unwrap();

    ActivityGroupFactory::new(db, creator.id)
        .name("Trail Runners")
        .category("RUNNING")
        .build()
        .await
        .unwrap();
    ActivityGroupFactory::new(db, creator.id)
        .name("Trail Walkers")
        .category("HIKING")
        .build()
        .await
        .unwrap();

    let repo = ActivityGroupRepository::new(db);
    let results = repo.search("trail", Some("RUNNING")).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Trail Runners");
}

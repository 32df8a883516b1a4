use super::*;

/// Tests that None fields keep their stored values.
#[tokio::test]
async fn none_fields_keep_existing_values() {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = create_user(db).await.unwrap();
    let group = ActivityGroupFactory::new(db, creator.id)
        .name("Original Name")
        .max_members(8)
        .build()
        .await
        .unwrap();

    let repo = ActivityGroupRepository::new(db);
    let updated = repo
        .update_partial(
            group.id,
            UpdateGroupParams {
                description: Some("Fresh description".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Original Name");
    assert_eq!(updated.max_members, Some(8));
    assert_eq!(updated.description.as_deref(), Some("Fresh description"));
}

/// Tests that provided fields overwrite.
#[tokio::test]
async fn some_fields_overwrite() {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = create_user(db).await.unwrap();
    let group = ActivityGroupFactory::new(db, creator.id)
        .is_private(false)
        .build()
        .await
        .unwrap();

    let repo = ActivityGroupRepository::new(db);
    let updated = repo
        .update_partial(
            group.id,
            UpdateGroupParams {
                is_private: Some(true),
                max_members: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(updated.is_private);
    assert_eq!(updated.max_members, Some(3));
}

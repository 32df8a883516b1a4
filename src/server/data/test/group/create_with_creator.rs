use super::*;

fn params(creator_id: i32, name: &str) -> CreateGroupParams {
    CreateGroupParams {
        name: name.to_string(),
        icon: "🏕️".to_string(),
        color: "#10b981".to_string(),
        description: None,
        category: "CAMPING".to_string(),
        max_members: Some(10),
        is_private: false,
        creator_id,
    }
}

/// Tests that group creation inserts the creator's membership in the same
/// transaction.
#[tokio::test]
async fn creates_group_and_creator_membership() {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = create_user(db).await.unwrap();

    let repo = ActivityGroupRepository::new(db);
    let group = repo
        .create_with_creator(params(creator.id, "Lakeside Campers"))
        .await
        .unwrap();

    assert_eq!(group.creator_id, creator.id);
    assert!(repo.is_member(group.id, creator.id).await.unwrap());
    assert_eq!(repo.member_count(group.id).await.unwrap(), 1);
}

/// Tests the unique name pre-check helper.
#[tokio::test]
async fn name_exists_detects_taken_names() {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = create_user(db).await.unwrap();

    let repo = ActivityGroupRepository::new(db);
    repo.create_with_creator(params(creator.id, "Lakeside Campers"))
        .await
        .unwrap();

    assert!(repo.name_exists("Lakeside Campers").await.unwrap());
    assert!(!repo.name_exists("Mountain Campers").await.unwrap());
}

use super::*;

/// Tests membership insertion, lookup and removal.
#[tokio::test]
async fn add_and_remove_member() {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = create_user(db).await.unwrap();
    let joiner = create_user(db).await.unwrap();
    let group = ActivityGroupFactory::new(db, creator.id).build().await.unwrap();

    let repo = ActivityGroupRepository::new(db);
    assert!(!repo.is_member(group.id, joiner.id).await.unwrap());

    repo.add_member(group.id, joiner.id).await.unwrap();
    assert!(repo.is_member(group.id, joiner.id).await.unwrap());
    assert_eq!(repo.member_count(group.id).await.unwrap(), 2);

    repo.remove_member(group.id, joiner.id).await.unwrap();
    assert!(!repo.is_member(group.id, joiner.id).await.unwrap());
    assert_eq!(repo.member_count(group.id).await.unwrap(), 1);
}

/// Tests the per-user group listing and count used by the profile page.
#[tokio::test]
async fn for_user_lists_joined_groups() {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = create_user(db).await.unwrap();
    let member = create_user(db).await.unwrap();

    let joined = ActivityGroupFactory::new(db, creator.id).build().await.unwrap();
    ActivityGroupFactory::new(db, creator.id).build().await.unwrap();

    let repo = ActivityGroupRepository::new(db);
    repo.add_member(joined.id, member.id).await.unwrap();

    let groups = repo.for_user(member.id).await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].id, joined.id);
    assert_eq!(repo.count_groups_for_user(member.id).await.unwrap(), 1);
    assert_eq!(repo.count_groups_for_user(creator.id).await.unwrap(), 2);
}

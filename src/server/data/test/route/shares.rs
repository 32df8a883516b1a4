use super::*;

/// Tests the shared-with set operations.
#[tokio::test]
async fn add_check_and_remove_shares() {
    let test = TestBuilder::new().with_route_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = create_user(db).await.unwrap();
    let friend = create_user(db).await.unwrap();
    let route = RouteFactory::new(db, owner.id).build().await.unwrap();

    let repo = RouteRepository::new(db);
    assert!(!repo.is_shared_with(route.id, friend.id).await.unwrap());

    repo.add_share(route.id, friend.id).await.unwrap();
    assert!(repo.is_shared_with(route.id, friend.id).await.unwrap());
    assert_eq!(repo.shared_user_ids(route.id).await.unwrap(), vec![friend.id]);

    repo.remove_share(route.id, friend.id).await.unwrap();
    assert!(repo.shared_user_ids(route.id).await.unwrap().is_empty());

    // Removing again is a no-op, not an error.
    repo.remove_share(route.id, friend.id).await.unwrap();
}

/// Tests the shared-with-me listing.
#[tokio::test]
async fn shared_with_user_lists_incoming_routes() {
    let test = TestBuilder::new().with_route_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = create_user(db).await.unwrap();
    let me = create_user(db).await.unwrap();

    let shared = RouteFactory::new(db, owner.id).build().await.unwrap();
    RouteFactory::new(db, owner.id).build().await.unwrap();

    let repo = RouteRepository::new(db);
    repo.add_share(shared.id, me.id).await.unwrap();

    let incoming = repo.shared_with_user(me.id).await.unwrap();
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0].id, shared.id);
}

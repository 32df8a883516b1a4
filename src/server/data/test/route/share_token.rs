use super::*;

/// Tests setting, resolving and clearing the share token.
#[tokio::test]
async fn set_find_and_clear_token() {
    let test = TestBuilder::new().with_route_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = create_user(db).await.unwrap();
    let route = RouteFactory::new(db, owner.id).build().await.unwrap();

    let repo = RouteRepository::new(db);
    repo.set_share_token(route.id, Some("opaque-token-123".to_string()))
        .await
        .unwrap();

    let found = repo.find_by_share_token("opaque-token-123").await.unwrap();
    assert_eq!(found.unwrap().id, route.id);

    repo.set_share_token(route.id, None).await.unwrap();
    assert!(repo
        .find_by_share_token("opaque-token-123")
        .await
        .unwrap()
        .is_none());
}

/// Tests that an unknown token resolves to nothing.
#[tokio::test]
async fn unknown_token_resolves_to_none() {
    let test = TestBuilder::new().with_route_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RouteRepository::new(db);
    assert!(repo.find_by_share_token("missing").await.unwrap().is_none());
}

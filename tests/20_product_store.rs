mod common;

use anyhow::Result;
use catalog_api::database::{models::ProductInput, ProductStore, StoreError};
use common::dec;

// Postgres product store CRUD, in a throwaway schema; skipped without DATABASE_URL.

#[tokio::test]
async fn create_then_get_round_trips_every_field() -> Result<()> {
    let Some(db) = common::TestDb::create().await? else { return Ok(()) };
    common::seed(&db).await?;
    let store = db.products();

    let mut input = ProductInput::new("Desk Lamp", dec("24.50"), 1).with_sub_category("lighting").with_stock(7);
    input.description = Some("Warm white LED".to_string());
    input.image_url = Some("lamp.jpg".to_string());
    input.featured = true;

    let created = store.create(&input).await?;
    assert_eq!(created.product_id, 4);

    let fetched = store.get_by_id(created.product_id).await?;
    assert_eq!(fetched, input.into_product(4));
    assert_eq!(fetched.price.to_string(), "24.50");

    db.teardown().await
}

#[tokio::test]
async fn get_missing_product_is_not_found() -> Result<()> {
    let Some(db) = common::TestDb::create().await? else { return Ok(()) };
    let err = db.products().get_by_id(1).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "Product", id: 1 }), "got {:?}", err);
    db.teardown().await
}

#[tokio::test]
async fn create_with_unknown_category_is_a_persistence_error() -> Result<()> {
    let Some(db) = common::TestDb::create().await? else { return Ok(()) };
    let err = db.products().create(&ProductInput::new("Orphan", dec("1.00"), 77)).await.unwrap_err();
    assert!(matches!(err, StoreError::Persistence(_)), "got {:?}", err);
    db.teardown().await
}

#[tokio::test]
async fn update_replaces_every_field() -> Result<()> {
    let Some(db) = common::TestDb::create().await? else { return Ok(()) };
    common::seed(&db).await?;
    let store = db.products();

    let payload = ProductInput::new("Hardcover", dec("22.00"), 2).with_stock(3);
    let updated = store.update(3, &payload).await?;
    assert_eq!(updated, payload.clone().into_product(3));
    assert_eq!(store.get_by_id(3).await?, payload.clone().into_product(3));

    assert!(store.update(30, &payload).await.unwrap_err().is_not_found());

    db.teardown().await
}

#[tokio::test]
async fn delete_is_not_silent_on_missing_rows() -> Result<()> {
    let Some(db) = common::TestDb::create().await? else { return Ok(()) };
    common::seed(&db).await?;
    let store = db.products();

    store.delete(2).await?;
    assert!(store.get_by_id(2).await.unwrap_err().is_not_found());
    assert!(store.delete(2).await.unwrap_err().is_not_found());
    assert_eq!(store.list_all().await?.len(), 2);

    db.teardown().await
}

#[tokio::test]
async fn list_by_category_never_reports_not_found() -> Result<()> {
    let Some(db) = common::TestDb::create().await? else { return Ok(()) };
    common::seed(&db).await?;
    let store = db.products();

    let ids: Vec<i32> = store.list_by_category_id(1).await?.iter().map(|p| p.product_id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(store.list_by_category_id(404).await?.is_empty());

    db.teardown().await
}

mod common;

use catalog_api::dto::UpdateCategory;
use catalog_api::error::ApiError;

use common::{sample_category, sample_product, spawn};

#[tokio::test]
async fn create_then_fetch_by_id_returns_identical_fields() {
    let app = spawn().await;

    let created = app
        .categories
        .create(sample_category("bagels"))
        .await
        .expect("failed to create category");
    assert!(created.id > 0);
    assert_eq!(created.version, 1);

    let fetched = app
        .categories
        .get_by_id(created.id)
        .await
        .expect("failed to fetch category");
    assert_eq!(fetched.name, "bagels");
    assert_eq!(fetched.description.as_deref(), Some("bagels description"));
    assert_eq!(fetched.id, created.id);
}

#[tokio::test]
async fn update_name_only_preserves_description() {
    let app = spawn().await;
    let created = app
        .categories
        .create(sample_category("bagels"))
        .await
        .unwrap();

    let updated = app
        .categories
        .update(UpdateCategory {
            id: created.id,
            name: Some("rings".to_owned()),
            description: None,
            version: None,
        })
        .await
        .expect("failed to update category");

    assert_eq!(updated.name, "rings");
    assert_eq!(updated.description.as_deref(), Some("bagels description"));
    assert_eq!(updated.version, 2);
}

#[tokio::test]
async fn update_unknown_category_is_not_found() {
    let app = spawn().await;

    let err = app
        .categories
        .update(UpdateCategory {
            id: 4242,
            name: Some("nope".to_owned()),
            description: None,
            version: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn stale_version_is_rejected() {
    let app = spawn().await;
    let created = app
        .categories
        .create(sample_category("bagels"))
        .await
        .unwrap();

    // First writer presents the version it read and wins.
    app.categories
        .update(UpdateCategory {
            id: created.id,
            name: Some("first".to_owned()),
            description: None,
            version: Some(1),
        })
        .await
        .expect("first update should apply");

    // Second writer still holds version 1 and is rejected.
    let err = app
        .categories
        .update(UpdateCategory {
            id: created.id,
            name: Some("second".to_owned()),
            description: None,
            version: Some(1),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    let current = app.categories.get_by_id(created.id).await.unwrap();
    assert_eq!(current.name, "first");
}

#[tokio::test]
async fn delete_unknown_category_is_not_found() {
    let app = spawn().await;

    let err = app.categories.delete(999).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn delete_referenced_category_conflicts_until_products_are_gone() {
    let app = spawn().await;
    let category = app
        .categories
        .create(sample_category("bagels"))
        .await
        .unwrap();
    let product = app
        .products
        .save_without_image(sample_product("p-1", category.id))
        .await
        .unwrap();

    let err = app.categories.delete(category.id).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    app.products.delete_by_id(product.id).await.unwrap();
    app.categories
        .delete(category.id)
        .await
        .expect("delete should succeed once no product references the category");

    let err = app.categories.get_by_id(category.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn get_by_name_finds_matching_category() {
    let app = spawn().await;
    app.categories
        .create(sample_category("bagels"))
        .await
        .unwrap();
    app.categories
        .create(sample_category("pretzels"))
        .await
        .unwrap();

    let found = app.categories.get_by_name("pretzels").await.unwrap();
    assert_eq!(found.name, "pretzels");

    let err = app.categories.get_by_name("croissants").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn list_returns_every_category() {
    let app = spawn().await;
    assert!(app.categories.list().await.unwrap().is_empty());

    app.categories
        .create(sample_category("bagels"))
        .await
        .unwrap();
    app.categories
        .create(sample_category("pretzels"))
        .await
        .unwrap();

    let all = app.categories.list().await.unwrap();
    assert_eq!(all.len(), 2);
}

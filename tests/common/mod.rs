#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use catalog_api::dto::{CreateCategory, ProductDto, UploadedFile};
use catalog_api::entities::product::InventoryStatus;
use catalog_api::entities::setup_schema;
use catalog_api::services::{CategoryService, FileStore, ProductService};

pub struct TestApp {
    pub db: Arc<DatabaseConnection>,
    pub categories: CategoryService,
    pub products: ProductService,
    pub upload_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

/// Fresh services over an in-memory SQLite database and a unique temp upload
/// directory. One connection only, so every query sees the same database.
pub async fn spawn() -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("failed to open in-memory database");
    setup_schema(&db).await.expect("failed to create schema");
    let db = Arc::new(db);

    let upload_dir = std::env::temp_dir().join(format!("catalog-test-{}", uuid::Uuid::new_v4()));

    TestApp {
        categories: CategoryService::new(db.clone()),
        products: ProductService::new(db.clone(), FileStore::new(upload_dir.clone())),
        db,
        upload_dir,
    }
}

pub fn sample_category(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_owned(),
        description: Some(format!("{name} description")),
    }
}

pub fn sample_product(code: &str, category_id: i32) -> ProductDto {
    ProductDto {
        code: code.to_owned(),
        name: format!("product {code}"),
        description: "a perfectly ordinary product".to_owned(),
        price: 10.0,
        quantity: 5,
        internal_reference: format!("ref-{code}"),
        inventory_status: InventoryStatus::InStock,
        rating: 3.5,
        category_id,
    }
}

pub fn sample_upload(file_name: &str, bytes: &[u8]) -> UploadedFile {
    UploadedFile {
        file_name: file_name.to_owned(),
        bytes: bytes.to_vec(),
    }
}

use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

use catalog_api::api::{create_api_router, AppState};
use catalog_api::config::Config;
use catalog_api::entities::setup_schema;
use catalog_api::services::{CategoryService, FileStore, ProductService};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let db: DatabaseConnection = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to the database");
    setup_schema(&db).await.expect("failed to create schema");

    let shared_db = Arc::new(db);
    let state = Arc::new(AppState {
        categories: CategoryService::new(shared_db.clone()),
        products: ProductService::new(shared_db, FileStore::new(config.upload_dir.clone())),
    });

    let app = create_api_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind listener");
    tracing::info!(addr = %config.bind_addr, "catalog backend listening");
    axum::serve(listener, app).await.expect("server error");
}

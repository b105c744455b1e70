pub mod category;
pub mod product;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

use crate::entities::{category::Entity as Category, product::Entity as Product};

/// Creates the catalog tables. Meant to run once at startup against a fresh
/// database; categories first, products reference them.
pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());
    let create_categories_table = schema.create_table_from_entity(Category);
    let create_products_table = schema.create_table_from_entity(Product);

    db.execute(db.get_database_backend().build(&create_categories_table))
        .await?;
    db.execute(db.get_database_backend().build(&create_products_table))
        .await?;
    Ok(())
}

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter,
    Set,
};

use crate::dto::{ProductDto, ProductPatch, UploadedFile};
use crate::entities::{category, product};
use crate::error::{ApiError, ApiResult};
use crate::services::storage::FileStore;

#[derive(Clone)]
pub struct ProductService {
    db: Arc<DatabaseConnection>,
    files: FileStore,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>, files: FileStore) -> ProductService {
        ProductService { db, files }
    }

    pub async fn get_by_id(&self, id: i32) -> ApiResult<product::Model> {
        product::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("no product with id {id}")))
    }

    /// Name lookup passes the store semantics through: no match is `None`,
    /// not an error.
    pub async fn get_by_name(&self, name: &str) -> ApiResult<Option<product::Model>> {
        Ok(product::Entity::find()
            .filter(product::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await?)
    }

    pub async fn list(&self) -> ApiResult<Vec<product::Model>> {
        Ok(product::Entity::find().all(self.db.as_ref()).await?)
    }

    pub async fn save_without_image(&self, dto: ProductDto) -> ApiResult<product::Model> {
        self.insert_product(dto, None).await
    }

    /// Stores the upload first, then inserts the row. If the insert (or the
    /// category resolution) fails, the file just written is removed again so
    /// no orphan is left behind.
    pub async fn save_with_image(
        &self,
        upload: UploadedFile,
        dto: ProductDto,
    ) -> ApiResult<product::Model> {
        let stored_path = self.files.save(&upload.file_name, &upload.bytes).await?;
        match self.insert_product(dto, Some(stored_path.clone())).await {
            Ok(model) => Ok(model),
            Err(err) => {
                self.files.remove(&stored_path).await;
                Err(err)
            }
        }
    }

    pub async fn delete_by_id(&self, id: i32) -> ApiResult<()> {
        let existing = self.get_by_id(id).await?;
        existing.delete(self.db.as_ref()).await?;
        Ok(())
    }

    /// Field-by-field partial merge. A missing or null field keeps the
    /// stored value; for `quantity` and `rating`, zero keeps it too. A
    /// present `categoryId` is re-resolved and fails with NotFound when
    /// unknown.
    pub async fn update_by_id(&self, id: i32, patch: ProductPatch) -> ApiResult<product::Model> {
        let existing = self.get_by_id(id).await?;
        if let Some(version) = patch.version {
            if version != existing.version {
                return Err(ApiError::Conflict(format!(
                    "product {id} changed concurrently: payload version {version}, stored version {}",
                    existing.version
                )));
            }
        }

        if let Some(category_id) = patch.category_id {
            self.resolve_category(category_id).await?;
        }

        let current_version = existing.version;
        let mut active: product::ActiveModel = existing.into();
        if let Some(code) = patch.code {
            active.code = Set(code);
        }
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(price) = patch.price {
            active.price = Set(price);
        }
        if let Some(quantity) = patch.quantity.filter(|quantity| *quantity != 0) {
            active.quantity = Set(quantity);
        }
        if let Some(internal_reference) = patch.internal_reference {
            active.internal_reference = Set(internal_reference);
        }
        if let Some(inventory_status) = patch.inventory_status {
            active.inventory_status = Set(inventory_status);
        }
        if let Some(rating) = patch.rating.filter(|rating| *rating != 0.0) {
            active.rating = Set(rating);
        }
        if let Some(category_id) = patch.category_id {
            active.category_id = Set(category_id);
        }
        active.updated_at = Set(Utc::now());
        active.version = Set(current_version + 1);

        Ok(active.update(self.db.as_ref()).await?)
    }

    /// Replaces the stored image path with a freshly stored file. The
    /// previous file, if any, stays on disk.
    pub async fn update_image_by_id(
        &self,
        id: i32,
        upload: UploadedFile,
    ) -> ApiResult<product::Model> {
        let existing = self.get_by_id(id).await?;
        let stored_path = self.files.save(&upload.file_name, &upload.bytes).await?;

        let current_version = existing.version;
        let mut active: product::ActiveModel = existing.into();
        active.image = Set(Some(stored_path.clone()));
        active.updated_at = Set(Utc::now());
        active.version = Set(current_version + 1);

        match active.update(self.db.as_ref()).await {
            Ok(model) => Ok(model),
            Err(err) => {
                self.files.remove(&stored_path).await;
                Err(ApiError::Db(err))
            }
        }
    }

    /// Raw bytes of the product's image plus the stored path (the handler
    /// derives the content type from its extension). A product without an
    /// image, or a missing file, surfaces as an I/O failure.
    pub async fn image_bytes(&self, id: i32) -> ApiResult<(Vec<u8>, String)> {
        let existing = self.get_by_id(id).await?;
        let stored_path = existing.image.ok_or_else(|| {
            ApiError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("product {id} has no stored image"),
            ))
        })?;
        let bytes = self.files.read(&stored_path).await?;
        Ok((bytes, stored_path))
    }

    async fn resolve_category(&self, id: i32) -> ApiResult<category::Model> {
        category::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("no category with id {id}")))
    }

    async fn insert_product(
        &self,
        dto: ProductDto,
        image: Option<String>,
    ) -> ApiResult<product::Model> {
        self.resolve_category(dto.category_id).await?;

        let inserted = dto
            .into_active_model(image, Utc::now())
            .insert(self.db.as_ref())
            .await?;

        // Read back by id to confirm the row is durable before answering.
        product::Entity::find_by_id(inserted.id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| {
                ApiError::Db(DbErr::RecordNotFound(format!(
                    "product {} missing after insert",
                    inserted.id
                )))
            })
    }
}

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set,
};

use crate::dto::{CreateCategory, UpdateCategory};
use crate::entities::{category, product};
use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct CategoryService {
    db: Arc<DatabaseConnection>,
}

impl CategoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> CategoryService {
        CategoryService { db }
    }

    pub async fn get_by_id(&self, id: i32) -> ApiResult<category::Model> {
        category::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("no category with id {id}")))
    }

    pub async fn get_by_name(&self, name: &str) -> ApiResult<category::Model> {
        category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("no category named '{name}'")))
    }

    pub async fn list(&self) -> ApiResult<Vec<category::Model>> {
        Ok(category::Entity::find().all(self.db.as_ref()).await?)
    }

    pub async fn create(&self, payload: CreateCategory) -> ApiResult<category::Model> {
        let now = Utc::now();
        let new_category = category::ActiveModel {
            name: Set(payload.name),
            description: Set(payload.description),
            created_at: Set(now),
            updated_at: Set(now),
            version: Set(1),
            ..Default::default()
        };
        Ok(new_category.insert(self.db.as_ref()).await?)
    }

    /// Partial update: `name` and `description` only replace the stored
    /// values when present in the payload. A stale `version` is rejected.
    pub async fn update(&self, payload: UpdateCategory) -> ApiResult<category::Model> {
        let existing = self.get_by_id(payload.id).await?;
        if let Some(version) = payload.version {
            if version != existing.version {
                return Err(ApiError::Conflict(format!(
                    "category {} changed concurrently: payload version {version}, stored version {}",
                    existing.id, existing.version
                )));
            }
        }

        let current_version = existing.version;
        let mut active: category::ActiveModel = existing.into();
        if let Some(name) = payload.name {
            active.name = Set(name);
        }
        if let Some(description) = payload.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now());
        active.version = Set(current_version + 1);

        Ok(active.update(self.db.as_ref()).await?)
    }

    /// Hard delete. Fails with NotFound for an unknown id and with Conflict
    /// while any product still references the category.
    pub async fn delete(&self, id: i32) -> ApiResult<()> {
        let existing = self.get_by_id(id).await?;

        let in_use = product::Entity::find()
            .filter(product::Column::CategoryId.eq(id))
            .count(self.db.as_ref())
            .await?;
        if in_use > 0 {
            return Err(ApiError::Conflict(format!(
                "category {id} is still referenced by {in_use} product(s)"
            )));
        }

        existing.delete(self.db.as_ref()).await?;
        Ok(())
    }
}

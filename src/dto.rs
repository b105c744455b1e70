use sea_orm::prelude::DateTimeUtc;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::entities::product::{self, InventoryStatus};

/// Create payload for products. Wire names are camelCase to match the
/// existing client.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[validate(length(min = 1, message = "code cannot be empty"))]
    pub code: String,
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 500,
        message = "description must be between 1 and 500 characters"
    ))]
    pub description: String,
    #[validate(range(exclusive_min = 0.0, message = "price must be positive"))]
    pub price: f64,
    #[validate(range(min = 0, message = "quantity must be zero or more"))]
    pub quantity: i32,
    #[validate(length(min = 1, message = "internal reference cannot be empty"))]
    pub internal_reference: String,
    pub inventory_status: InventoryStatus,
    #[validate(range(min = 1.0, max = 5.0, message = "rating must be between 1 and 5"))]
    pub rating: f64,
    pub category_id: i32,
}

impl ProductDto {
    /// Copies the validated fields onto a fresh active model. The category
    /// reference is set by the service after it has been resolved.
    pub fn into_active_model(self, image: Option<String>, now: DateTimeUtc) -> product::ActiveModel {
        product::ActiveModel {
            code: Set(self.code),
            name: Set(self.name),
            description: Set(self.description),
            image: Set(image),
            price: Set(self.price),
            quantity: Set(self.quantity),
            internal_reference: Set(self.internal_reference),
            inventory_status: Set(self.inventory_status),
            rating: Set(self.rating),
            category_id: Set(self.category_id),
            created_at: Set(now),
            updated_at: Set(now),
            version: Set(1),
            ..Default::default()
        }
    }
}

/// Partial-update payload for products. A missing or null field keeps the
/// stored value; for `quantity` and `rating` an explicit zero keeps it too,
/// so a genuine update to zero is not expressible through this payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub rating: Option<f64>,
    pub internal_reference: Option<String>,
    pub inventory_status: Option<InventoryStatus>,
    pub category_id: Option<i32>,
    /// Version the caller read; when present, a mismatch rejects the write.
    pub version: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
}

/// Category update payload; the target id travels in the body.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<i32>,
}

/// An uploaded file, already drained from the multipart stream.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

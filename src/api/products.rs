use axum::{
    extract::{Extension, Multipart, Path},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use validator::Validate;

use crate::api::AppState;
use crate::dto::{ProductDto, ProductPatch, UploadedFile};
use crate::entities::product::{self, InventoryStatus};
use crate::error::{ApiError, ApiResult};

pub fn product_router() -> Router {
    Router::new()
        .route("/products/save", post(create_product))
        .route(
            "/products",
            post(create_product_with_image).get(list_products),
        )
        .route(
            "/products/:id",
            get(get_product).patch(update_product).delete(delete_product),
        )
        .route("/products/:id/image", axum::routing::patch(update_product_image))
        .route("/products/productImage/:productId", get(get_product_image))
}

async fn create_product(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<ProductDto>,
) -> ApiResult<(StatusCode, Json<product::Model>)> {
    payload.validate()?;
    let created = state.products.save_without_image(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn create_product_with_image(
    Extension(state): Extension<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<product::Model>)> {
    let (upload, dto) = parse_product_form(multipart).await?;
    dto.validate()?;
    let created = state.products.save_with_image(upload, dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_products(
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<Json<Vec<product::Model>>> {
    Ok(Json(state.products.list().await?))
}

async fn get_product(
    Path(id): Path<i32>,
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<Json<product::Model>> {
    Ok(Json(state.products.get_by_id(id).await?))
}

async fn update_product(
    Path(id): Path<i32>,
    Extension(state): Extension<Arc<AppState>>,
    Json(patch): Json<ProductPatch>,
) -> ApiResult<Json<product::Model>> {
    Ok(Json(state.products.update_by_id(id, patch).await?))
}

async fn update_product_image(
    Path(id): Path<i32>,
    Extension(state): Extension<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Json<product::Model>> {
    let upload = parse_image_field(multipart, "image").await?;
    Ok(Json(state.products.update_image_by_id(id, upload).await?))
}

async fn delete_product(
    Path(id): Path<i32>,
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.products.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_product_image(
    Path(product_id): Path<i32>,
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<(HeaderMap, Vec<u8>)> {
    let (bytes, stored_path) = state.products.image_bytes(product_id).await?;

    let content_type = mime_guess::from_path(&stored_path)
        .first_raw()
        .unwrap_or("application/octet-stream");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(content_type)
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("inline"),
    );

    Ok((headers, bytes))
}

/// Drains the multipart body of the create-with-image form: the `file` field
/// becomes the upload, every other field is collected as text and parsed
/// into the product DTO.
async fn parse_product_form(mut multipart: Multipart) -> ApiResult<(UploadedFile, ProductDto)> {
    let mut upload: Option<UploadedFile> = None;
    let mut fields: HashMap<String, String> = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::Validation(format!("malformed multipart body: {err}")))?
    {
        let name = match field.name() {
            Some(name) => name.to_owned(),
            None => return Err(ApiError::Validation("multipart field without a name".into())),
        };
        if name == "file" {
            let file_name = field.file_name().unwrap_or("upload").to_owned();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| ApiError::Validation(format!("failed to read file bytes: {err}")))?;
            upload = Some(UploadedFile {
                file_name,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field.text().await.map_err(|err| {
                ApiError::Validation(format!("failed to read field '{name}': {err}"))
            })?;
            fields.insert(name, value);
        }
    }

    let upload =
        upload.ok_or_else(|| ApiError::Validation("missing multipart field: file".into()))?;
    let dto = product_dto_from_fields(&mut fields)?;
    Ok((upload, dto))
}

/// Pulls a single named file out of a multipart body, ignoring other fields.
async fn parse_image_field(mut multipart: Multipart, field_name: &str) -> ApiResult<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::Validation(format!("malformed multipart body: {err}")))?
    {
        if field.name() == Some(field_name) {
            let file_name = field.file_name().unwrap_or("upload").to_owned();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| ApiError::Validation(format!("failed to read file bytes: {err}")))?;
            return Ok(UploadedFile {
                file_name,
                bytes: bytes.to_vec(),
            });
        }
    }
    Err(ApiError::Validation(format!(
        "missing multipart field: {field_name}"
    )))
}

fn product_dto_from_fields(fields: &mut HashMap<String, String>) -> ApiResult<ProductDto> {
    let inventory_status = InventoryStatus::from_str(&take_field(fields, "inventoryStatus")?)
        .map_err(|_| {
            ApiError::Validation(
                "inventoryStatus must be one of INSTOCK, LOWSTOCK, OUTOFSTOCK".into(),
            )
        })?;

    Ok(ProductDto {
        code: take_field(fields, "code")?,
        name: take_field(fields, "name")?,
        description: take_field(fields, "description")?,
        price: parse_field(fields, "price")?,
        quantity: parse_field(fields, "quantity")?,
        internal_reference: take_field(fields, "internalReference")?,
        inventory_status,
        rating: parse_field(fields, "rating")?,
        category_id: parse_field(fields, "categoryId")?,
    })
}

fn take_field(fields: &mut HashMap<String, String>, name: &str) -> ApiResult<String> {
    fields
        .remove(name)
        .ok_or_else(|| ApiError::Validation(format!("missing multipart field: {name}")))
}

fn parse_field<T: FromStr>(fields: &mut HashMap<String, String>, name: &str) -> ApiResult<T> {
    take_field(fields, name)?
        .parse::<T>()
        .map_err(|_| ApiError::Validation(format!("invalid value for field '{name}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_fields() -> HashMap<String, String> {
        HashMap::from([
            ("code".to_owned(), "p-1".to_owned()),
            ("name".to_owned(), "product p-1".to_owned()),
            ("description".to_owned(), "a product".to_owned()),
            ("price".to_owned(), "10.5".to_owned()),
            ("quantity".to_owned(), "5".to_owned()),
            ("internalReference".to_owned(), "ref-p-1".to_owned()),
            ("inventoryStatus".to_owned(), "LOWSTOCK".to_owned()),
            ("rating".to_owned(), "4".to_owned()),
            ("categoryId".to_owned(), "3".to_owned()),
        ])
    }

    #[test]
    fn form_fields_parse_into_a_dto() {
        let mut fields = form_fields();
        let dto = product_dto_from_fields(&mut fields).unwrap();

        assert_eq!(dto.code, "p-1");
        assert_eq!(dto.price, 10.5);
        assert_eq!(dto.quantity, 5);
        assert_eq!(dto.internal_reference, "ref-p-1");
        assert_eq!(dto.inventory_status, InventoryStatus::LowStock);
        assert_eq!(dto.rating, 4.0);
        assert_eq!(dto.category_id, 3);
        assert!(fields.is_empty());
    }

    #[test]
    fn missing_form_field_is_a_validation_error() {
        let mut fields = form_fields();
        fields.remove("price");

        let err = product_dto_from_fields(&mut fields).unwrap_err();
        assert!(matches!(err, ApiError::Validation(msg) if msg.contains("price")));
    }

    #[test]
    fn unknown_inventory_status_is_a_validation_error() {
        let mut fields = form_fields();
        fields.insert("inventoryStatus".to_owned(), "BACKORDER".to_owned());

        let err = product_dto_from_fields(&mut fields).unwrap_err();
        assert!(matches!(err, ApiError::Validation(msg) if msg.contains("inventoryStatus")));
    }

    #[test]
    fn non_numeric_field_is_a_validation_error() {
        let mut fields = form_fields();
        fields.insert("quantity".to_owned(), "many".to_owned());

        let err = product_dto_from_fields(&mut fields).unwrap_err();
        assert!(matches!(err, ApiError::Validation(msg) if msg.contains("quantity")));
    }
}

use contracts::domain::a001_product::aggregate::{Product, ProductSummary, ProductWrite};
use contracts::domain::common::StoreRecord;

use super::repository;
use crate::shared::config::get_config;
use crate::shared::ids;
use crate::shared::store::{StoreError, UploadFile};

pub async fn list_summaries() -> Result<Vec<ProductSummary>, StoreError> {
    let products = repository::list_all().await?;
    Ok(products.iter().map(ProductSummary::from).collect())
}

pub async fn list_all() -> Result<Vec<Product>, StoreError> {
    repository::list_all().await
}

pub async fn get_by_id(id: &str) -> Result<Option<Product>, StoreError> {
    repository::get_by_id(id).await
}

/// One entry point for the add/edit form: an existing record id means
/// update, otherwise create with a freshly generated `product_id`.
pub async fn save(
    existing_id: Option<&str>,
    mut write: ProductWrite,
    files: Vec<UploadFile>,
) -> Result<Product, StoreError> {
    match existing_id {
        Some(id) => {
            tracing::info!("Updating product {}", id);
            repository::update(id, &write, files).await
        }
        None => {
            write.product_id = Some(next_product_id().await?);
            tracing::info!(
                "Creating product {}",
                write.product_id.as_deref().unwrap_or_default()
            );
            repository::insert(&write, files).await
        }
    }
}

/// Next `PROD_<year>_<seq>` identifier from a scan of the existing records.
pub async fn next_product_id() -> Result<String, StoreError> {
    let prefix = ids::year_prefix("PROD", &get_config().ids.current_year);
    ids::next_collection_id(Product::collection_name(), ids::PRODUCT_ID_FIELD, &prefix).await
}

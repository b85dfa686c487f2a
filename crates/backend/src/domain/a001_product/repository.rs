use contracts::domain::a001_product::aggregate::{Product, ProductWrite};
use contracts::domain::common::StoreRecord;

use crate::shared::store::{get_store, ListQuery, StoreError, UploadFile};

/// Listing cap; matches the page size used by the identifier scan.
const LIST_PAGE_SIZE: u32 = 200;

pub async fn list_all() -> Result<Vec<Product>, StoreError> {
    let page = get_store()
        .list::<Product>(
            Product::collection_name(),
            &ListQuery {
                per_page: Some(LIST_PAGE_SIZE),
                ..Default::default()
            },
        )
        .await?;
    Ok(page.items)
}

pub async fn get_by_id(id: &str) -> Result<Option<Product>, StoreError> {
    match get_store()
        .get_one::<Product>(Product::collection_name(), id)
        .await
    {
        Ok(product) => Ok(Some(product)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Create a record; attachments switch the write to multipart.
pub async fn insert(write: &ProductWrite, files: Vec<UploadFile>) -> Result<Product, StoreError> {
    let store = get_store();
    if files.is_empty() {
        store.create(Product::collection_name(), write).await
    } else {
        store
            .create_multipart(Product::collection_name(), write.to_form_fields(), files)
            .await
    }
}

pub async fn update(
    id: &str,
    write: &ProductWrite,
    files: Vec<UploadFile>,
) -> Result<Product, StoreError> {
    let store = get_store();
    if files.is_empty() {
        store.update(Product::collection_name(), id, write).await
    } else {
        store
            .update_multipart(Product::collection_name(), id, write.to_form_fields(), files)
            .await
    }
}

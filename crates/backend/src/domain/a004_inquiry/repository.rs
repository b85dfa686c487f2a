use contracts::domain::a004_inquiry::aggregate::{Inquiry, InquiryWrite};
use contracts::domain::common::StoreRecord;
use serde::Serialize;

use crate::shared::store::client::escape_filter_value;
use crate::shared::store::{get_store, ListQuery, StoreError};

const LIST_PAGE_SIZE: u32 = 200;

pub async fn list_all() -> Result<Vec<Inquiry>, StoreError> {
    let page = get_store()
        .list::<Inquiry>(
            Inquiry::collection_name(),
            &ListQuery {
                per_page: Some(LIST_PAGE_SIZE),
                ..Default::default()
            },
        )
        .await?;
    Ok(page.items)
}

pub async fn list_by_customer(customer_record_id: &str) -> Result<Vec<Inquiry>, StoreError> {
    let filter = format!(
        "customer = \"{}\"",
        escape_filter_value(customer_record_id)
    );
    let page = get_store()
        .list::<Inquiry>(
            Inquiry::collection_name(),
            &ListQuery {
                per_page: Some(LIST_PAGE_SIZE),
                filter: Some(filter),
                ..Default::default()
            },
        )
        .await?;
    Ok(page.items)
}

pub async fn get_by_id(id: &str) -> Result<Option<Inquiry>, StoreError> {
    match get_store()
        .get_one::<Inquiry>(Inquiry::collection_name(), id)
        .await
    {
        Ok(inquiry) => Ok(Some(inquiry)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn insert(write: &InquiryWrite) -> Result<Inquiry, StoreError> {
    get_store().create(Inquiry::collection_name(), write).await
}

#[derive(Serialize)]
struct StatusPatch<'a> {
    status: &'a str,
    updated: &'a str,
}

/// Write only the status and the `updated` stamp, leaving the rest of the
/// record alone.
pub async fn update_status(id: &str, status: &str, updated: &str) -> Result<Inquiry, StoreError> {
    get_store()
        .update(
            Inquiry::collection_name(),
            id,
            &StatusPatch { status, updated },
        )
        .await
}

pub async fn delete(id: &str) -> Result<(), StoreError> {
    get_store().delete(Inquiry::collection_name(), id).await
}

use contracts::domain::a002_customer::aggregate::{Customer, CustomerWrite};
use contracts::domain::common::StoreRecord;

use crate::shared::store::{get_store, ListQuery, StoreError};

const LIST_PAGE_SIZE: u32 = 200;

pub async fn list_all() -> Result<Vec<Customer>, StoreError> {
    let page = get_store()
        .list::<Customer>(
            Customer::collection_name(),
            &ListQuery {
                per_page: Some(LIST_PAGE_SIZE),
                ..Default::default()
            },
        )
        .await?;
    Ok(page.items)
}

pub async fn get_by_id(id: &str) -> Result<Option<Customer>, StoreError> {
    match get_store()
        .get_one::<Customer>(Customer::collection_name(), id)
        .await
    {
        Ok(customer) => Ok(Some(customer)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn insert(write: &CustomerWrite) -> Result<Customer, StoreError> {
    get_store().create(Customer::collection_name(), write).await
}

use contracts::domain::a002_customer::aggregate::{Customer, CustomerWrite};
use contracts::domain::common::StoreRecord;

use super::repository;
use crate::shared::config::get_config;
use crate::shared::ids;
use crate::shared::store::StoreError;

pub async fn list_all() -> Result<Vec<Customer>, StoreError> {
    repository::list_all().await
}

pub async fn get_by_id(id: &str) -> Result<Option<Customer>, StoreError> {
    repository::get_by_id(id).await
}

/// Shared by both creation entry points (page-embedded form and the
/// standalone endpoint) so they produce identical record shapes.
pub async fn create(mut write: CustomerWrite) -> Result<Customer, StoreError> {
    write.customer_id = Some(next_customer_id().await?);
    tracing::info!(
        "Creating customer {}",
        write.customer_id.as_deref().unwrap_or_default()
    );
    repository::insert(&write).await
}

/// Next `CUST_<year>_<seq>` identifier from a scan of the existing records.
pub async fn next_customer_id() -> Result<String, StoreError> {
    let prefix = ids::year_prefix("CUST", &get_config().ids.current_year);
    ids::next_collection_id(Customer::collection_name(), ids::CUSTOMER_ID_FIELD, &prefix).await
}

use contracts::domain::a003_staff::aggregate::{StaffUser, StaffWrite};

use super::repository;
use crate::shared::store::StoreError;

pub async fn list_all() -> Result<Vec<StaffUser>, StoreError> {
    repository::list_all().await
}

pub async fn get_by_id(id: &str) -> Result<Option<StaffUser>, StoreError> {
    repository::get_by_id(id).await
}

pub async fn create(write: StaffWrite) -> Result<StaffUser, StoreError> {
    tracing::info!("Creating staff account {}", write.email);
    repository::insert(&write).await
}

/// Edit an account. The write payload already omits password keys when no
/// new password was supplied, so credentials stay untouched on a plain
/// profile edit.
pub async fn update(id: &str, write: StaffWrite) -> Result<StaffUser, StoreError> {
    tracing::info!("Updating staff account {}", id);
    repository::update(id, &write).await
}

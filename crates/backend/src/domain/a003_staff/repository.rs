use contracts::domain::a003_staff::aggregate::{StaffUser, StaffWrite};
use contracts::domain::common::StoreRecord;

use crate::shared::store::{get_store, ListQuery, StoreError};

const LIST_PAGE_SIZE: u32 = 200;

pub async fn list_all() -> Result<Vec<StaffUser>, StoreError> {
    let page = get_store()
        .list::<StaffUser>(
            StaffUser::collection_name(),
            &ListQuery {
                per_page: Some(LIST_PAGE_SIZE),
                ..Default::default()
            },
        )
        .await?;
    Ok(page.items)
}

pub async fn get_by_id(id: &str) -> Result<Option<StaffUser>, StoreError> {
    match get_store()
        .get_one::<StaffUser>(StaffUser::collection_name(), id)
        .await
    {
        Ok(user) => Ok(Some(user)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn insert(write: &StaffWrite) -> Result<StaffUser, StoreError> {
    get_store().create(StaffUser::collection_name(), write).await
}

pub async fn update(id: &str, write: &StaffWrite) -> Result<StaffUser, StoreError> {
    get_store()
        .update(StaffUser::collection_name(), id, write)
        .await
}

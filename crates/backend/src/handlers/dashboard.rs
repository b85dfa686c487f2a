use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_customer::aggregate::Customer;
use contracts::domain::a004_inquiry::aggregate::Inquiry;
use contracts::domain::common::StoreRecord;
use contracts::system::auth::SessionUser;
use serde::Serialize;

use super::store_failure;
use crate::shared::store::{get_store, ListQuery, StoreError};
use crate::system::auth::extractor::CurrentUser;

/// Landing page data: who is signed in plus collection totals.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub user: SessionUser,
    pub product_count: i64,
    pub customer_count: i64,
    pub inquiry_count: i64,
}

/// GET /dashboard
pub async fn view(
    CurrentUser(claims): CurrentUser,
) -> Result<Json<DashboardView>, (StatusCode, String)> {
    let product_count = count(Product::collection_name())
        .await
        .map_err(|e| store_failure("Error counting products", e))?;
    let customer_count = count(Customer::collection_name())
        .await
        .map_err(|e| store_failure("Error counting customers", e))?;
    let inquiry_count = count(Inquiry::collection_name())
        .await
        .map_err(|e| store_failure("Error counting inquiries", e))?;

    Ok(Json(DashboardView {
        user: claims.user(),
        product_count,
        customer_count,
        inquiry_count,
    }))
}

/// Ask for one item and read the total off the page envelope.
async fn count(collection: &str) -> Result<i64, StoreError> {
    let page = get_store()
        .list::<serde_json::Value>(
            collection,
            &ListQuery {
                per_page: Some(1),
                ..Default::default()
            },
        )
        .await?;
    Ok(page.total_items)
}

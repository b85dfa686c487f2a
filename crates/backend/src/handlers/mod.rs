pub mod a001_product;
pub mod a002_customer;
pub mod a003_staff;
pub mod a004_inquiry;
pub mod dashboard;

use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use serde_json::json;

use crate::domain::a004_inquiry::service::InquiryError;
use crate::shared::store::StoreError;

/// Supplier pages are not built out yet; they exist so the navigation does
/// not dead-end.
pub async fn supplier_placeholder() -> &'static str {
    "Coming soon."
}

/// POST /add_supplier — nothing to record, bounce back to the list page.
pub async fn supplier_submit() -> Redirect {
    Redirect::to("/suppliers")
}

/// Map a store failure onto the status surfaced to the browser.
pub(crate) fn store_status(e: &StoreError) -> StatusCode {
    StatusCode::from_u16(e.status()).unwrap_or(StatusCode::BAD_GATEWAY)
}

pub(crate) fn store_failure(context: &str, e: StoreError) -> (StatusCode, String) {
    tracing::error!("{}: {}", context, e);
    (store_status(&e), format!("{}: {}", context, e))
}

pub(crate) fn inquiry_status(e: &InquiryError) -> StatusCode {
    StatusCode::from_u16(e.status()).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// JSON error body for the API surface.
pub(crate) fn api_failure(e: InquiryError) -> (StatusCode, Json<serde_json::Value>) {
    tracing::error!("inquiry API error: {}", e);
    (inquiry_status(&e), Json(json!({ "error": e.to_string() })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn supplier_submit_redirects_to_the_list() {
        let response = supplier_submit().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/suppliers"
        );
    }
}

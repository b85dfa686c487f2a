use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::{Form, Json};
use contracts::domain::a001_product::aggregate::ProductSummary;
use contracts::domain::a002_customer::aggregate::Customer;
use contracts::domain::a004_inquiry::aggregate::{
    split_product_ids, Inquiry, InquiryView, NewInquiry,
};
use contracts::domain::a004_inquiry::status_pipeline::{self, StatusStage};
use contracts::domain::common::coerce_opt_i64;
use serde::{Deserialize, Serialize};

use super::{api_failure, inquiry_status, store_failure};
use crate::domain::a004_inquiry::service;
use crate::domain::{a001_product, a002_customer};

// ============================================================================
// Page surface (form posts, redirects)
// ============================================================================

/// Inquiry list plus the pipeline stages the page needs to render status
/// controls.
#[derive(Debug, Serialize)]
pub struct InquiriesPage {
    pub inquiries: Vec<InquiryView>,
    pub status_flow: &'static [StatusStage],
}

/// GET /inquiries
pub async fn list() -> Result<Json<InquiriesPage>, (StatusCode, String)> {
    match service::list_views().await {
        Ok(inquiries) => Ok(Json(InquiriesPage {
            inquiries,
            status_flow: status_pipeline::stages(),
        })),
        Err(e) => Err(page_failure("Error fetching inquiries", e)),
    }
}

/// Inline status update posted from the list page.
#[derive(Debug, Deserialize)]
pub struct ListStatusForm {
    pub inquiry_id: Option<String>,
    pub status: Option<String>,
}

/// POST /inquiries
pub async fn update_from_list(
    Form(form): Form<ListStatusForm>,
) -> Result<Redirect, (StatusCode, String)> {
    if let (Some(inquiry_id), Some(status)) = (form.inquiry_id, form.status) {
        service::update_status(&inquiry_id, &status)
            .await
            .map_err(|e| page_failure("Failed to update inquiry", e))?;
    }
    Ok(Redirect::to("/inquiries"))
}

/// Selection lists for the add-inquiry form.
#[derive(Debug, Serialize)]
pub struct AddInquiryPage {
    pub customers: Vec<Customer>,
    pub products: Vec<ProductSummary>,
}

/// GET /add_inquiry
pub async fn add_form() -> Result<Json<AddInquiryPage>, (StatusCode, String)> {
    let customers = a002_customer::service::list_all()
        .await
        .map_err(|e| store_failure("Error fetching customers", e))?;
    let products = a001_product::service::list_summaries()
        .await
        .map_err(|e| store_failure("Error fetching products", e))?;
    Ok(Json(AddInquiryPage {
        customers,
        products,
    }))
}

/// Raw add-inquiry form. The multi-select arrives as one delimited
/// `products` value, the same encoding the store field uses.
#[derive(Debug, Default, Deserialize)]
pub struct AddInquiryForm {
    #[serde(rename = "Customer")]
    pub customer: Option<String>,
    pub products: Option<String>,
    pub quantity: Option<String>,
    pub terms: Option<String>,
}

impl AddInquiryForm {
    pub fn coerce(&self) -> Result<NewInquiry, String> {
        Ok(NewInquiry {
            customer: self.customer.clone().unwrap_or_default(),
            products: split_product_ids(self.products.as_deref().unwrap_or_default()),
            product: None,
            quantity: coerce_opt_i64("quantity", self.quantity.as_deref())?,
            terms: self.terms.clone(),
        })
    }
}

/// POST /add_inquiry
pub async fn create_from_form(
    Form(form): Form<AddInquiryForm>,
) -> Result<Redirect, (StatusCode, String)> {
    let request = form
        .coerce()
        .map_err(|message| (StatusCode::BAD_REQUEST, message))?;

    match service::create(&request).await {
        Ok(_) => Ok(Redirect::to("/inquiries")),
        Err(e) => Err(page_failure("Error creating inquiry", e)),
    }
}

/// Detail view with the pipeline for the stage selector.
#[derive(Debug, Serialize)]
pub struct InquiryDetailPage {
    pub inquiry: InquiryView,
    pub status_flow: &'static [StatusStage],
}

/// GET /inquiry/:id
pub async fn detail(
    Path(id): Path<String>,
) -> Result<Json<InquiryDetailPage>, (StatusCode, String)> {
    match service::detail(&id).await {
        Ok(inquiry) => Ok(Json(InquiryDetailPage {
            inquiry,
            status_flow: status_pipeline::stages(),
        })),
        Err(e) => Err(page_failure("Error fetching inquiry", e)),
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: Option<String>,
}

/// POST /update_status/:id — a label outside the pipeline is rejected with
/// a 400 and the inquiry is left unchanged.
pub async fn update_status(
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, (StatusCode, String)> {
    let status = form.status.unwrap_or_default();
    match service::update_status(&id, &status).await {
        Ok(_) => Ok(Redirect::to(&format!("/inquiry/{}", id))),
        Err(e) => Err((inquiry_status(&e), e.to_string())),
    }
}

fn page_failure(context: &str, e: service::InquiryError) -> (StatusCode, String) {
    tracing::error!("{}: {}", context, e);
    (inquiry_status(&e), format!("{}: {}", context, e))
}

// ============================================================================
// JSON API surface
// ============================================================================

type ApiError = (StatusCode, Json<serde_json::Value>);

/// POST /api/inquiries
pub async fn api_create(
    Json(request): Json<NewInquiry>,
) -> Result<(StatusCode, Json<Inquiry>), ApiError> {
    match service::create(&request).await {
        Ok(inquiry) => Ok((StatusCode::CREATED, Json(inquiry))),
        Err(e) => Err(api_failure(e)),
    }
}

/// GET /api/inquiries
pub async fn api_list() -> Result<Json<Vec<Inquiry>>, ApiError> {
    match service::list_raw().await {
        Ok(inquiries) => Ok(Json(inquiries)),
        Err(e) => Err(api_failure(e)),
    }
}

/// GET /api/inquiries/:id
pub async fn api_get(Path(id): Path<String>) -> Result<Json<Inquiry>, ApiError> {
    match service::get_raw(&id).await {
        Ok(inquiry) => Ok(Json(inquiry)),
        Err(e) => Err(api_failure(e)),
    }
}

/// DELETE /api/inquiries/:id
pub async fn api_delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    match service::delete(&id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(api_failure(e)),
    }
}

/// GET /api/customer/:id/purchases
pub async fn api_customer_purchases(
    Path(id): Path<String>,
) -> Result<Json<Vec<Inquiry>>, ApiError> {
    match service::purchases_by_customer(&id).await {
        Ok(inquiries) => Ok(Json(inquiries)),
        Err(e) => Err(api_failure(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_products_split_on_the_delimiter() {
        let form = AddInquiryForm {
            customer: Some("c1".into()),
            products: Some("p1,p2, p3".into()),
            quantity: Some("5".into()),
            terms: None,
        };
        let request = form.coerce().unwrap();
        assert_eq!(request.product_ids(), vec!["p1", "p2", "p3"]);
        assert_eq!(request.quantity, Some(5));
    }

    #[test]
    fn malformed_quantity_is_rejected() {
        let form = AddInquiryForm {
            customer: Some("c1".into()),
            products: Some("p1".into()),
            quantity: Some("lots".into()),
            terms: None,
        };
        assert_eq!(form.coerce().unwrap_err(), "Invalid quantity");
    }
}

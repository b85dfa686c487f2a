use std::collections::HashMap;

use chrono::Utc;
use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_customer::aggregate::Customer;
use contracts::domain::a004_inquiry::aggregate::{
    derive_inquiry_number, join_product_ids, Inquiry, InquiryView, InquiryWrite, NewInquiry,
};
use contracts::domain::a004_inquiry::status_pipeline;
use thiserror::Error;

use super::repository;
use crate::domain::{a001_product, a002_customer};
use crate::shared::store::StoreError;

#[derive(Debug, Error)]
pub enum InquiryError {
    #[error("Customer and at least one product must be selected.")]
    MissingSelection,

    #[error("Customer {0} not found")]
    CustomerNotFound(String),

    #[error("Product {0} not found")]
    ProductNotFound(String),

    #[error("Invalid status.")]
    InvalidStatus(String),

    #[error("Inquiry not found.")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl InquiryError {
    /// HTTP status surfaced for this failure.
    pub fn status(&self) -> u16 {
        match self {
            InquiryError::MissingSelection | InquiryError::InvalidStatus(_) => 400,
            InquiryError::CustomerNotFound(_)
            | InquiryError::ProductNotFound(_)
            | InquiryError::NotFound => 404,
            InquiryError::Store(e) => e.status(),
        }
    }
}

/// Create an inquiry. The linked customer and every linked product must
/// exist at creation time; the derived number is
/// `<customer_id>_<product_id>` of the customer and first product, and the
/// initial status is the pipeline's first stage.
pub async fn create(request: &NewInquiry) -> Result<Inquiry, InquiryError> {
    let product_record_ids = request.product_ids();
    if request.customer.trim().is_empty() || product_record_ids.is_empty() {
        return Err(InquiryError::MissingSelection);
    }

    let customer = a002_customer::repository::get_by_id(&request.customer)
        .await?
        .ok_or_else(|| InquiryError::CustomerNotFound(request.customer.clone()))?;

    let mut products = Vec::with_capacity(product_record_ids.len());
    for id in &product_record_ids {
        let product = a001_product::repository::get_by_id(id)
            .await?
            .ok_or_else(|| InquiryError::ProductNotFound(id.clone()))?;
        products.push(product);
    }

    let write = InquiryWrite {
        inquiry_number: derive_inquiry_number(&customer.customer_id, &products[0].product_id),
        customer: customer.id.clone(),
        product_ids: join_product_ids(&product_record_ids),
        quantity: request.quantity,
        terms: request.terms.clone().unwrap_or_default(),
        status: status_pipeline::first().label.to_string(),
        updated: now_stamp(),
    };

    tracing::info!("Creating inquiry {}", write.inquiry_number);
    Ok(repository::insert(&write).await?)
}

/// All inquiries joined with their customers and products, newest update
/// first. The joins are built from two bulk listings rather than per-row
/// fetches.
pub async fn list_views() -> Result<Vec<InquiryView>, InquiryError> {
    let mut inquiries = repository::list_all().await?;
    inquiries.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));

    let customers: HashMap<String, Customer> = a002_customer::repository::list_all()
        .await?
        .into_iter()
        .map(|c| (c.id.clone(), c))
        .collect();
    let products: HashMap<String, Product> = a001_product::repository::list_all()
        .await?
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

    Ok(inquiries
        .iter()
        .map(|inquiry| build_view(inquiry, &customers, &products))
        .collect())
}

pub async fn detail(id: &str) -> Result<InquiryView, InquiryError> {
    let inquiry = repository::get_by_id(id)
        .await?
        .ok_or(InquiryError::NotFound)?;

    let customer = match a002_customer::repository::get_by_id(&inquiry.customer).await {
        Ok(found) => found,
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e.into()),
    };

    let mut products = Vec::new();
    for product_id in inquiry.product_id_list() {
        if let Some(product) = a001_product::repository::get_by_id(&product_id).await? {
            products.push(product);
        }
    }

    Ok(assemble_view(&inquiry, customer, products))
}

/// Set an inquiry's status. Labels outside the pipeline are rejected before
/// any write, leaving the record unchanged. Stage skipping and reverting
/// within the pipeline are allowed.
pub async fn update_status(id: &str, status: &str) -> Result<Inquiry, InquiryError> {
    if !status_pipeline::is_valid(status) {
        return Err(InquiryError::InvalidStatus(status.to_string()));
    }
    tracing::info!("Inquiry {} status -> {}", id, status);
    Ok(repository::update_status(id, status, &now_stamp()).await?)
}

pub async fn delete(id: &str) -> Result<(), InquiryError> {
    tracing::info!("Deleting inquiry {}", id);
    Ok(repository::delete(id).await?)
}

pub async fn list_raw() -> Result<Vec<Inquiry>, InquiryError> {
    let mut inquiries = repository::list_all().await?;
    inquiries.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
    Ok(inquiries)
}

pub async fn get_raw(id: &str) -> Result<Inquiry, InquiryError> {
    repository::get_by_id(id)
        .await?
        .ok_or(InquiryError::NotFound)
}

/// Inquiries linked to one customer, for the purchases endpoint.
pub async fn purchases_by_customer(
    customer_record_id: &str,
) -> Result<Vec<Inquiry>, InquiryError> {
    a002_customer::repository::get_by_id(customer_record_id)
        .await?
        .ok_or_else(|| InquiryError::CustomerNotFound(customer_record_id.to_string()))?;

    let mut inquiries = repository::list_by_customer(customer_record_id).await?;
    inquiries.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
    Ok(inquiries)
}

fn build_view(
    inquiry: &Inquiry,
    customers: &HashMap<String, Customer>,
    products: &HashMap<String, Product>,
) -> InquiryView {
    let customer = customers.get(&inquiry.customer).cloned();
    let linked_products = inquiry
        .product_id_list()
        .iter()
        .filter_map(|id| products.get(id).cloned())
        .collect();
    assemble_view(inquiry, customer, linked_products)
}

fn assemble_view(
    inquiry: &Inquiry,
    customer: Option<Customer>,
    products: Vec<Product>,
) -> InquiryView {
    let stage = status_pipeline::find(&inquiry.status);
    InquiryView {
        id: inquiry.id.clone(),
        inquiry_number: inquiry.inquiry_number.clone(),
        customer,
        products,
        quantity: inquiry.quantity,
        terms: inquiry.terms.clone(),
        status: inquiry.status.clone(),
        status_glyph: stage.map(|s| s.glyph.to_string()).unwrap_or_default(),
        status_color: stage.map(|s| s.color_class.to_string()).unwrap_or_default(),
        updated: inquiry.updated.clone(),
    }
}

fn now_stamp() -> String {
    Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inquiry(id: &str, status: &str, updated: &str) -> Inquiry {
        Inquiry {
            id: id.to_string(),
            status: status.to_string(),
            updated: updated.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn views_carry_pipeline_metadata() {
        let record = inquiry("r1", "Quoting", "2025-03-01 09:30:00.000Z");
        let view = assemble_view(&record, None, Vec::new());
        assert_eq!(view.status_glyph, "🟠");
        assert_eq!(view.status_color, "bg-orange-600");
    }

    #[test]
    fn unknown_status_renders_without_metadata() {
        let record = inquiry("r1", "Misfiled", "");
        let view = assemble_view(&record, None, Vec::new());
        assert_eq!(view.status_glyph, "");
        assert_eq!(view.status_color, "");
    }

    #[tokio::test]
    async fn status_outside_the_pipeline_is_rejected_without_a_write() {
        // The guard runs before any store access, so the record (and the
        // store itself) is never touched.
        let err = update_status("r1", "Misfiled").await.unwrap_err();
        assert!(matches!(err, InquiryError::InvalidStatus(_)));
        assert_eq!(err.status(), 400);
        assert_eq!(err.to_string(), "Invalid status.");
    }

    #[test]
    fn newest_update_sorts_first() {
        let mut records = vec![
            inquiry("old", "Inquiry", "2025-01-01 00:00:00.000Z"),
            inquiry("new", "Inquiry", "2025-06-01 00:00:00.000Z"),
            inquiry("blank", "Inquiry", ""),
        ];
        records.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        let order: Vec<&str> = records.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["new", "old", "blank"]);
    }
}

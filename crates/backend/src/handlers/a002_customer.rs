use axum::http::StatusCode;
use axum::response::Redirect;
use axum::{Form, Json};
use contracts::domain::a002_customer::aggregate::{Customer, CustomerForm};

use super::store_failure;
use crate::domain::a002_customer::service;

/// GET /customers
pub async fn list() -> Result<Json<Vec<Customer>>, (StatusCode, String)> {
    match service::list_all().await {
        Ok(customers) => Ok(Json(customers)),
        Err(e) => Err(store_failure("Error fetching customers", e)),
    }
}

/// POST /customers and POST /add_customer. Two historical entry points for
/// the same creation; both run through the one service function and produce
/// the same record shape.
pub async fn create(Form(form): Form<CustomerForm>) -> Result<Redirect, (StatusCode, String)> {
    let write = form
        .coerce()
        .map_err(|message| (StatusCode::BAD_REQUEST, message))?;

    match service::create(write).await {
        Ok(_) => Ok(Redirect::to("/customers")),
        Err(e) => Err(store_failure("Error adding customer", e)),
    }
}

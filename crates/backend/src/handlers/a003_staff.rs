use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::{Form, Json};
use contracts::domain::a003_staff::aggregate::{StaffForm, StaffUser};

use super::store_failure;
use crate::domain::a003_staff::service;

/// GET /staff
pub async fn list() -> Result<Json<Vec<StaffUser>>, (StatusCode, String)> {
    match service::list_all().await {
        Ok(users) => Ok(Json(users)),
        Err(e) => Err(store_failure("Error fetching users", e)),
    }
}

/// GET /add_staff — blank form, nothing to prefill.
pub async fn add_form() -> StatusCode {
    StatusCode::OK
}

/// POST /add_staff — a password is mandatory on creation.
pub async fn create(Form(form): Form<StaffForm>) -> Result<Redirect, (StatusCode, String)> {
    let write = form
        .coerce(true)
        .map_err(|message| (StatusCode::BAD_REQUEST, message))?;

    match service::create(write).await {
        Ok(_) => Ok(Redirect::to("/staff")),
        Err(e) => Err(store_failure("Error creating staff member", e)),
    }
}

/// GET /edit_staff/:id — prefill for the edit form.
pub async fn edit_prefill(
    Path(id): Path<String>,
) -> Result<Json<StaffUser>, (StatusCode, String)> {
    match service::get_by_id(&id).await {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Staff member not found".to_string())),
        Err(e) => Err(store_failure("Error fetching staff member", e)),
    }
}

/// POST /edit_staff/:id — the password is only changed when a new one is
/// supplied.
pub async fn update(
    Path(id): Path<String>,
    Form(form): Form<StaffForm>,
) -> Result<Redirect, (StatusCode, String)> {
    let write = form
        .coerce(false)
        .map_err(|message| (StatusCode::BAD_REQUEST, message))?;

    match service::update(&id, write).await {
        Ok(_) => Ok(Redirect::to("/staff")),
        Err(e) => Err(store_failure("Error updating staff member", e)),
    }
}

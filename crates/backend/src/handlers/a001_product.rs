use axum::extract::{Multipart, Query};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use contracts::domain::a001_product::aggregate::{Product, ProductForm, ProductSummary};
use serde::Deserialize;

use super::store_failure;
use crate::domain::a001_product::service;
use crate::shared::store::UploadFile;

/// Query string of the add/edit form: an id switches it to edit mode.
#[derive(Debug, Default, Deserialize)]
pub struct EditQuery {
    pub id: Option<String>,
}

/// GET /product
pub async fn list() -> Result<Json<Vec<ProductSummary>>, (StatusCode, String)> {
    match service::list_summaries().await {
        Ok(products) => Ok(Json(products)),
        Err(e) => Err(store_failure("Error fetching products", e)),
    }
}

/// GET /add_product — form prefill: the product being edited, or null for a
/// blank form.
pub async fn edit_prefill(
    Query(query): Query<EditQuery>,
) -> Result<Json<Option<Product>>, (StatusCode, String)> {
    let Some(id) = query.id else {
        return Ok(Json(None));
    };
    match service::get_by_id(&id).await {
        Ok(product) => Ok(Json(product)),
        Err(e) => Err(store_failure("Error fetching product", e)),
    }
}

/// POST /add_product — one multipart form for both create (no id in the
/// query) and update (id present). A missing or malformed price is a 400
/// and nothing is written.
pub async fn save(
    Query(query): Query<EditQuery>,
    multipart: Multipart,
) -> Result<Redirect, (StatusCode, String)> {
    let (form, files) = read_product_form(multipart).await?;
    let write = form
        .coerce()
        .map_err(|message| (StatusCode::BAD_REQUEST, message))?;

    match service::save(query.id.as_deref(), write, files).await {
        Ok(_) => Ok(Redirect::to("/product")),
        Err(e) => Err(store_failure("Error saving product", e)),
    }
}

/// Collect the multipart body into the raw form plus any `uploaded_docs`
/// attachments. Parts with an empty filename are browser placeholders for
/// "no file chosen" and are skipped.
async fn read_product_form(
    mut multipart: Multipart,
) -> Result<(ProductForm, Vec<UploadFile>), (StatusCode, String)> {
    let mut form = ProductForm::default();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Malformed form: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "uploaded_docs" {
            let filename = field.file_name().unwrap_or_default().to_string();
            if filename.is_empty() {
                continue;
            }
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, format!("Malformed upload: {}", e)))?
                .to_vec();
            files.push(UploadFile {
                field: "uploaded_docs".to_string(),
                filename,
                content_type,
                bytes,
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("Malformed form: {}", e)))?;
        set_field(&mut form, &name, value);
    }

    Ok((form, files))
}

fn set_field(form: &mut ProductForm, name: &str, value: String) {
    let slot = match name {
        "name" => &mut form.name,
        "supplier" => &mut form.supplier,
        "model" => &mut form.model,
        "description" => &mut form.description,
        "gross_weight" => &mut form.gross_weight,
        "product_size" => &mut form.product_size,
        "hs_code" => &mut form.hs_code,
        "tax_rate" => &mut form.tax_rate,
        "vat" => &mut form.vat,
        "qty_per_box" => &mut form.qty_per_box,
        "box_size" => &mut form.box_size,
        "box_weight" => &mut form.box_weight,
        "buying_rate" => &mut form.buying_rate,
        "selling_rate" => &mut form.selling_rate,
        "terms" => &mut form.terms,
        "specifications" => &mut form.specifications,
        "price" => &mut form.price,
        // Unknown fields are dropped rather than rejected.
        _ => return,
    };
    *slot = Some(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_fields_land_in_the_form() {
        let mut form = ProductForm::default();
        set_field(&mut form, "price", "10.5".into());
        set_field(&mut form, "hs_code", "8413.70".into());
        set_field(&mut form, "unknown_gadget", "x".into());
        assert_eq!(form.price.as_deref(), Some("10.5"));
        assert_eq!(form.hs_code.as_deref(), Some("8413.70"));
    }
}

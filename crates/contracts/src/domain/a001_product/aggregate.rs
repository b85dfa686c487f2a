use serde::{Deserialize, Serialize};

use crate::domain::common::{coerce_opt_f64, coerce_opt_i64, StoreRecord};

// ============================================================================
// Aggregate
// ============================================================================

/// Product record as persisted in the `products` collection.
///
/// `product_id` is the business identifier (`PROD_<year>_<seq>`), distinct
/// from the store-issued record `id`. Products are never deleted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub gross_weight: Option<f64>,
    #[serde(default)]
    pub product_size: String,
    #[serde(default)]
    pub hs_code: String,
    #[serde(default)]
    pub tax_rate: Option<f64>,
    #[serde(default)]
    pub vat: Option<f64>,
    #[serde(default)]
    pub qty_per_box: Option<i64>,
    #[serde(default)]
    pub box_size: String,
    #[serde(default)]
    pub box_weight: Option<f64>,
    #[serde(default)]
    pub buying_rate: Option<f64>,
    #[serde(default)]
    pub selling_rate: Option<f64>,
    #[serde(default)]
    pub terms: String,
    #[serde(default)]
    pub specifications: String,
    #[serde(default)]
    pub price: f64,
    /// Filenames of documents attached to the record by the store.
    #[serde(default)]
    pub uploaded_docs: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

impl StoreRecord for Product {
    fn collection_name() -> &'static str {
        "products"
    }
}

/// Row shape for the product list view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub supplier: String,
    pub model: String,
    pub price: f64,
}

impl From<&Product> for ProductSummary {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            product_id: p.product_id.clone(),
            name: p.name.clone(),
            supplier: p.supplier.clone(),
            model: p.model.clone(),
            price: p.price,
        }
    }
}

// ============================================================================
// Form DTO and coercion
// ============================================================================

/// Raw add/edit product form fields before coercion. Every field arrives as
/// text; numeric fields are coerced by [`ProductForm::coerce`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    pub name: Option<String>,
    pub supplier: Option<String>,
    pub model: Option<String>,
    pub description: Option<String>,
    pub gross_weight: Option<String>,
    pub product_size: Option<String>,
    pub hs_code: Option<String>,
    pub tax_rate: Option<String>,
    pub vat: Option<String>,
    pub qty_per_box: Option<String>,
    pub box_size: Option<String>,
    pub box_weight: Option<String>,
    pub buying_rate: Option<String>,
    pub selling_rate: Option<String>,
    pub terms: Option<String>,
    pub specifications: Option<String>,
    pub price: Option<String>,
}

/// Typed write payload for the `products` collection.
///
/// `product_id` is filled in by the service: generated on create, left out
/// on update so the existing identifier is preserved.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWrite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub name: String,
    pub supplier: String,
    pub model: String,
    pub description: String,
    pub gross_weight: Option<f64>,
    pub product_size: String,
    pub hs_code: String,
    pub tax_rate: Option<f64>,
    pub vat: Option<f64>,
    pub qty_per_box: Option<i64>,
    pub box_size: String,
    pub box_weight: Option<f64>,
    pub buying_rate: Option<f64>,
    pub selling_rate: Option<f64>,
    pub terms: String,
    pub specifications: String,
    pub price: f64,
}

impl ProductForm {
    /// Coerce the raw form into a typed write payload.
    ///
    /// A missing or malformed `price` is a hard validation error; optional
    /// numeric fields fall back to `None` when absent or blank.
    pub fn coerce(&self) -> Result<ProductWrite, String> {
        let price = self
            .price
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "Invalid price".to_string())?
            .parse::<f64>()
            .map_err(|_| "Invalid price".to_string())?;

        Ok(ProductWrite {
            product_id: None,
            name: text(&self.name),
            supplier: text(&self.supplier),
            model: text(&self.model),
            description: text(&self.description),
            gross_weight: coerce_opt_f64("gross_weight", self.gross_weight.as_deref())?,
            product_size: text(&self.product_size),
            hs_code: text(&self.hs_code),
            tax_rate: coerce_opt_f64("tax_rate", self.tax_rate.as_deref())?,
            vat: coerce_opt_f64("vat", self.vat.as_deref())?,
            qty_per_box: coerce_opt_i64("qty_per_box", self.qty_per_box.as_deref())?,
            box_size: text(&self.box_size),
            box_weight: coerce_opt_f64("box_weight", self.box_weight.as_deref())?,
            buying_rate: coerce_opt_f64("buying_rate", self.buying_rate.as_deref())?,
            selling_rate: coerce_opt_f64("selling_rate", self.selling_rate.as_deref())?,
            terms: text(&self.terms),
            specifications: text(&self.specifications),
            price,
        })
    }
}

impl ProductWrite {
    /// Flatten into text fields for a multipart write (document uploads ride
    /// along in the same request). `None` numerics are left out entirely.
    pub fn to_form_fields(&self) -> Vec<(String, String)> {
        let mut fields: Vec<(String, String)> = Vec::new();
        let mut push = |name: &str, value: String| fields.push((name.to_string(), value));

        if let Some(product_id) = &self.product_id {
            push("product_id", product_id.clone());
        }
        push("name", self.name.clone());
        push("supplier", self.supplier.clone());
        push("model", self.model.clone());
        push("description", self.description.clone());
        if let Some(v) = self.gross_weight {
            push("gross_weight", v.to_string());
        }
        push("product_size", self.product_size.clone());
        push("hs_code", self.hs_code.clone());
        if let Some(v) = self.tax_rate {
            push("tax_rate", v.to_string());
        }
        if let Some(v) = self.vat {
            push("vat", v.to_string());
        }
        if let Some(v) = self.qty_per_box {
            push("qty_per_box", v.to_string());
        }
        push("box_size", self.box_size.clone());
        if let Some(v) = self.box_weight {
            push("box_weight", v.to_string());
        }
        if let Some(v) = self.buying_rate {
            push("buying_rate", v.to_string());
        }
        if let Some(v) = self.selling_rate {
            push("selling_rate", v.to_string());
        }
        push("terms", self.terms.clone());
        push("specifications", self.specifications.clone());
        push("price", self.price.to_string());
        fields
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with_price(price: Option<&str>) -> ProductForm {
        ProductForm {
            name: Some("Water pump".into()),
            price: price.map(|s| s.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_price_is_a_validation_error() {
        assert_eq!(
            form_with_price(None).coerce().unwrap_err(),
            "Invalid price"
        );
        assert_eq!(
            form_with_price(Some("  ")).coerce().unwrap_err(),
            "Invalid price"
        );
    }

    #[test]
    fn malformed_price_is_a_validation_error() {
        assert_eq!(
            form_with_price(Some("twelve")).coerce().unwrap_err(),
            "Invalid price"
        );
    }

    #[test]
    fn optional_numerics_fall_back_to_none() {
        let mut form = form_with_price(Some("12.50"));
        form.gross_weight = Some(String::new());
        form.vat = None;
        let write = form.coerce().unwrap();
        assert_eq!(write.price, 12.5);
        assert_eq!(write.gross_weight, None);
        assert_eq!(write.vat, None);
        assert_eq!(write.name, "Water pump");
    }

    #[test]
    fn malformed_optional_numeric_is_rejected() {
        let mut form = form_with_price(Some("10"));
        form.qty_per_box = Some("a dozen".into());
        assert_eq!(form.coerce().unwrap_err(), "Invalid qty_per_box");
    }

    #[test]
    fn form_fields_skip_absent_numerics() {
        let mut write = form_with_price(Some("10")).coerce().unwrap();
        write.product_id = Some("PROD_2025_0001".into());
        let fields = write.to_form_fields();
        assert!(fields.contains(&("product_id".into(), "PROD_2025_0001".into())));
        assert!(fields.contains(&("price".into(), "10".into())));
        assert!(!fields.iter().any(|(name, _)| name == "gross_weight"));
    }

    #[test]
    fn update_payload_leaves_product_id_untouched() {
        let write = form_with_price(Some("10")).coerce().unwrap();
        let json = serde_json::to_value(&write).unwrap();
        assert!(json.get("product_id").is_none());
    }
}

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a001_product::aggregate::Product;
use crate::domain::a002_customer::aggregate::Customer;
use crate::domain::common::StoreRecord;

/// Delimiter for the product id list in the store's flat `product_ids`
/// field.
pub const PRODUCT_ID_DELIMITER: char = ',';

// ============================================================================
// Aggregate
// ============================================================================

/// Inquiry record in the `inquiries` collection.
///
/// `customer` holds the customer record id; `product_ids` holds linked
/// product record ids as one delimited string, the shape both surfaces
/// write. `inquiry_number` is derived at creation and never recomputed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inquiry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub inquiry_number: String,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub product_ids: String,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub terms: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

impl StoreRecord for Inquiry {
    fn collection_name() -> &'static str {
        "inquiries"
    }
}

impl Inquiry {
    /// Linked product record ids, empty entries dropped.
    pub fn product_id_list(&self) -> Vec<String> {
        split_product_ids(&self.product_ids)
    }

    /// `updated` parsed as a UTC instant. The store writes
    /// `2025-03-01 09:30:00.123Z`; RFC 3339 stamps written by this service
    /// are accepted too. `None` when the field is blank or unparseable.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        parse_store_timestamp(&self.updated)
    }
}

/// Derived business identifier: `<customer_id>_<product_id>` of the linked
/// customer and the first linked product.
pub fn derive_inquiry_number(customer_id: &str, product_id: &str) -> String {
    format!("{}_{}", customer_id, product_id)
}

pub fn join_product_ids(ids: &[String]) -> String {
    ids.join(&PRODUCT_ID_DELIMITER.to_string())
}

pub fn split_product_ids(encoded: &str) -> Vec<String> {
    encoded
        .split(PRODUCT_ID_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_store_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value.trim_end_matches('Z'), "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

// ============================================================================
// Requests and views
// ============================================================================

/// Inquiry creation request. The JSON surface historically sent a single
/// `product`; the page form sends a `products` list. Both are accepted and
/// reconciled into one list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewInquiry {
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub terms: Option<String>,
}

impl NewInquiry {
    /// The reconciled product list: `products` when non-empty, otherwise the
    /// legacy single `product`.
    pub fn product_ids(&self) -> Vec<String> {
        let listed: Vec<String> = self
            .products
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !listed.is_empty() {
            return listed;
        }
        self.product
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| vec![s.to_string()])
            .unwrap_or_default()
    }
}

/// Write payload for the `inquiries` collection.
#[derive(Debug, Clone, Serialize)]
pub struct InquiryWrite {
    pub inquiry_number: String,
    pub customer: String,
    pub product_ids: String,
    pub quantity: Option<i64>,
    pub terms: String,
    pub status: String,
    pub updated: String,
}

/// Inquiry joined with its customer and products for list/detail rendering.
/// Missing references (deleted or unknown records) surface as `None`/absent
/// rather than failing the whole view.
#[derive(Debug, Clone, Serialize)]
pub struct InquiryView {
    pub id: String,
    pub inquiry_number: String,
    pub customer: Option<Customer>,
    pub products: Vec<Product>,
    pub quantity: Option<i64>,
    pub terms: String,
    pub status: String,
    pub status_glyph: String,
    pub status_color: String,
    pub updated: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inquiry_number_is_customer_then_product() {
        assert_eq!(
            derive_inquiry_number("CUST_2025_0003", "PROD_2025_0012"),
            "CUST_2025_0003_PROD_2025_0012"
        );
    }

    #[test]
    fn product_ids_round_trip_through_the_delimited_encoding() {
        let ids = vec!["abc123".to_string(), "def456".to_string()];
        let encoded = join_product_ids(&ids);
        assert_eq!(encoded, "abc123,def456");
        assert_eq!(split_product_ids(&encoded), ids);
    }

    #[test]
    fn split_drops_blank_entries() {
        assert_eq!(split_product_ids("a,,b, ,c"), vec!["a", "b", "c"]);
        assert!(split_product_ids("").is_empty());
    }

    #[test]
    fn new_inquiry_prefers_the_list_over_the_legacy_field() {
        let request = NewInquiry {
            customer: "c1".into(),
            products: vec!["p1".into(), " p2 ".into()],
            product: Some("p9".into()),
            ..Default::default()
        };
        assert_eq!(request.product_ids(), vec!["p1", "p2"]);
    }

    #[test]
    fn new_inquiry_falls_back_to_the_single_product() {
        let request = NewInquiry {
            customer: "c1".into(),
            product: Some("p9".into()),
            ..Default::default()
        };
        assert_eq!(request.product_ids(), vec!["p9"]);
        assert!(NewInquiry::default().product_ids().is_empty());
    }

    #[test]
    fn store_and_rfc3339_timestamps_both_parse() {
        let store_style = Inquiry {
            updated: "2025-03-01 09:30:00.123Z".into(),
            ..Default::default()
        };
        let rfc_style = Inquiry {
            updated: "2025-03-01T09:30:00.123+00:00".into(),
            ..Default::default()
        };
        assert_eq!(store_style.updated_at(), rfc_style.updated_at());
        assert!(Inquiry::default().updated_at().is_none());
        let garbage = Inquiry {
            updated: "yesterday".into(),
            ..Default::default()
        };
        assert!(garbage.updated_at().is_none());
    }
}

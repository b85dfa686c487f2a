/// An aggregate persisted as a record in a remote store collection.
///
/// Record ids, `created` and `updated` stamps are issued by the store;
/// this side never mints them.
pub trait StoreRecord {
    /// Canonical collection name. One spelling per collection: `products`,
    /// `customers`, `users`, `inquiries`.
    fn collection_name() -> &'static str;
}

/// Parse an optional numeric form field.
///
/// Absent or blank input coerces to `None`; present but malformed input is
/// a validation error carrying the field name.
pub fn coerce_opt_f64(field: &str, value: Option<&str>) -> Result<Option<f64>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("Invalid {}", field)),
    }
}

/// Same coercion rule for optional integer fields.
pub fn coerce_opt_i64(field: &str, value: Option<&str>) -> Result<Option<i64>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("Invalid {}", field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::aggregate::Product;
    use crate::domain::a002_customer::aggregate::Customer;
    use crate::domain::a003_staff::aggregate::StaffUser;
    use crate::domain::a004_inquiry::aggregate::Inquiry;

    #[test]
    fn collection_names_are_canonical() {
        assert_eq!(Product::collection_name(), "products");
        assert_eq!(Customer::collection_name(), "customers");
        assert_eq!(StaffUser::collection_name(), "users");
        assert_eq!(Inquiry::collection_name(), "inquiries");
    }

    #[test]
    fn blank_and_absent_coerce_to_none() {
        assert_eq!(coerce_opt_f64("vat", None), Ok(None));
        assert_eq!(coerce_opt_f64("vat", Some("")), Ok(None));
        assert_eq!(coerce_opt_f64("vat", Some("   ")), Ok(None));
        assert_eq!(coerce_opt_i64("qty_per_box", Some("")), Ok(None));
    }

    #[test]
    fn valid_numbers_parse() {
        assert_eq!(coerce_opt_f64("vat", Some("13.5")), Ok(Some(13.5)));
        assert_eq!(coerce_opt_i64("qty_per_box", Some(" 24 ")), Ok(Some(24)));
    }

    #[test]
    fn malformed_input_reports_the_field() {
        assert_eq!(
            coerce_opt_f64("tax_rate", Some("abc")),
            Err("Invalid tax_rate".to_string())
        );
        assert_eq!(
            coerce_opt_i64("qty_per_box", Some("1.5")),
            Err("Invalid qty_per_box".to_string())
        );
    }
}

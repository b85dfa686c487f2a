//! Year-prefixed sequential business identifiers (`PROD_2025_0001`,
//! `CUST_2025_0001`).

use crate::shared::store::{get_store, ListQuery, StoreError};

/// Page size cap when scanning a collection for existing identifiers.
const SCAN_PAGE_SIZE: u32 = 200;

pub const PRODUCT_ID_FIELD: &str = "product_id";
pub const CUSTOMER_ID_FIELD: &str = "customer_id";

/// `PROD_2025_` style prefix for a kind and year.
pub fn year_prefix(kind: &str, year: &str) -> String {
    format!("{}_{}_", kind, year)
}

/// Next identifier in a sequence: prefix plus one past the highest existing
/// suffix, zero-padded to 4 digits. Identifiers with other prefixes or
/// unparseable suffixes are skipped. An empty sequence yields `0001`.
///
/// Two concurrent callers can observe the same maximum and produce the same
/// identifier; there is no reservation step. The collision surfaces as a
/// unique-index rejection from the store when the second write lands.
pub fn next_in_sequence<'a, I>(prefix: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut max_num: u64 = 0;
    for id in existing {
        if let Some(suffix) = id.strip_prefix(prefix) {
            if let Ok(num) = suffix.parse::<u64>() {
                max_num = max_num.max(num);
            }
        }
    }
    format!("{}{:04}", prefix, max_num + 1)
}

/// Scan a collection's identifier field and compute the next value for the
/// given prefix.
pub async fn next_collection_id(
    collection: &str,
    field: &str,
    prefix: &str,
) -> Result<String, StoreError> {
    let page = get_store()
        .list::<serde_json::Value>(
            collection,
            &ListQuery {
                per_page: Some(SCAN_PAGE_SIZE),
                ..Default::default()
            },
        )
        .await?;

    let ids: Vec<&str> = page
        .items
        .iter()
        .filter_map(|record| record.get(field).and_then(|v| v.as_str()))
        .collect();

    Ok(next_in_sequence(prefix, ids))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_starts_at_0001() {
        assert_eq!(
            next_in_sequence("PROD_2025_", std::iter::empty()),
            "PROD_2025_0001"
        );
    }

    #[test]
    fn next_is_one_past_the_maximum() {
        let existing = ["PROD_2025_0001", "PROD_2025_0007", "PROD_2025_0003"];
        assert_eq!(
            next_in_sequence("PROD_2025_", existing),
            "PROD_2025_0008"
        );
    }

    #[test]
    fn malformed_suffixes_are_skipped() {
        let existing = ["PROD_2025_0004", "PROD_2025_abcd", "PROD_2025_"];
        assert_eq!(
            next_in_sequence("PROD_2025_", existing),
            "PROD_2025_0005"
        );
    }

    #[test]
    fn other_prefixes_do_not_affect_the_sequence() {
        let existing = ["PROD_2024_0099", "CUST_2025_0042", "PROD_2025_0002"];
        assert_eq!(
            next_in_sequence("PROD_2025_", existing),
            "PROD_2025_0003"
        );
    }

    #[test]
    fn suffix_keeps_growing_past_four_digits() {
        let existing = ["CUST_2025_9999"];
        assert_eq!(
            next_in_sequence("CUST_2025_", existing),
            "CUST_2025_10000"
        );
    }

    #[test]
    fn prefixes_follow_the_kind_and_year() {
        assert_eq!(year_prefix("PROD", "2025"), "PROD_2025_");
        assert_eq!(year_prefix("CUST", "2031"), "CUST_2031_");
    }
}

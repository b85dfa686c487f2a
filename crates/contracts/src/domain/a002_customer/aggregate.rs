use serde::{Deserialize, Serialize};

use crate::domain::common::StoreRecord;

/// Customer record in the `customers` collection.
///
/// `customer_id` (`CUST_<year>_<seq>`) is generated at creation; customers
/// are read for listings and inquiry linkage, never edited here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

impl StoreRecord for Customer {
    fn collection_name() -> &'static str {
        "customers"
    }
}

/// Raw customer creation form. Both entry points (page-embedded form and
/// the standalone endpoint) deserialize into this.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Write payload for the `customers` collection.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerWrite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
}

impl CustomerForm {
    pub fn coerce(&self) -> Result<CustomerWrite, String> {
        let name = required("name", &self.name)?;
        let email = required("email", &self.email)?;
        Ok(CustomerWrite {
            customer_id: None,
            name,
            email,
            phone: self.phone.clone().unwrap_or_default(),
            address: self.address.clone().unwrap_or_default(),
            notes: self.notes.clone().unwrap_or_default(),
        })
    }
}

fn required(field: &str, value: &Option<String>) -> Result<String, String> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Err(format!("Missing {}", field)),
        Some(s) => Ok(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_email_are_required() {
        let form = CustomerForm {
            email: Some("a@b.com".into()),
            ..Default::default()
        };
        assert_eq!(form.coerce().unwrap_err(), "Missing name");
    }

    #[test]
    fn blank_optionals_become_empty_strings() {
        let form = CustomerForm {
            name: Some("Acme Traders".into()),
            email: Some("office@acme.example".into()),
            ..Default::default()
        };
        let write = form.coerce().unwrap();
        assert_eq!(write.phone, "");
        assert_eq!(write.notes, "");
        assert!(write.customer_id.is_none());
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::common::StoreRecord;

/// Staff account in the `users` collection. The same collection backs end
/// user login, so credentials are write-only: they appear in write payloads
/// and never in reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

impl StoreRecord for StaffUser {
    fn collection_name() -> &'static str {
        "users"
    }
}

/// Raw add/edit staff form. `verified` is a checkbox: any submitted value
/// counts as checked, absence as unchecked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaffForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
    pub verified: Option<String>,
}

/// Write payload for the `users` collection. Password keys are present only
/// when a password is being set, so an edit without a new password leaves
/// credentials untouched.
#[derive(Debug, Clone, Serialize)]
pub struct StaffWrite {
    pub name: String,
    pub email: String,
    pub role: String,
    pub verified: bool,
    #[serde(rename = "emailVisibility")]
    pub email_visibility: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "passwordConfirm", skip_serializing_if = "Option::is_none")]
    pub password_confirm: Option<String>,
}

impl StaffForm {
    /// Build the write payload. A password is mandatory when creating and
    /// optional when editing.
    pub fn coerce(&self, password_required: bool) -> Result<StaffWrite, String> {
        let name = self.name.clone().unwrap_or_default();
        let email = match self.email.as_deref().map(str::trim) {
            None | Some("") => return Err("Missing email".to_string()),
            Some(s) => s.to_string(),
        };

        let password = self
            .password
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        if password_required && password.is_none() {
            return Err("Missing password".to_string());
        }

        Ok(StaffWrite {
            name,
            email,
            role: self.role.clone().unwrap_or_default(),
            verified: self.verified.is_some(),
            email_visibility: true,
            password_confirm: password.clone(),
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: Option<&str>) -> StaffForm {
        StaffForm {
            name: Some("Jordan".into()),
            email: Some("jordan@example.com".into()),
            role: Some("sales".into()),
            password: password.map(|s| s.to_string()),
            verified: Some("on".into()),
        }
    }

    #[test]
    fn create_requires_a_password() {
        assert_eq!(form(None).coerce(true).unwrap_err(), "Missing password");
        assert!(form(Some("secret123")).coerce(true).is_ok());
    }

    #[test]
    fn edit_without_password_omits_credential_keys() {
        let write = form(None).coerce(false).unwrap();
        let json = serde_json::to_value(&write).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("passwordConfirm").is_none());
        assert_eq!(json["verified"], true);
        assert_eq!(json["emailVisibility"], true);
    }

    #[test]
    fn supplied_password_is_confirmed() {
        let write = form(Some("secret123")).coerce(false).unwrap();
        assert_eq!(write.password.as_deref(), Some("secret123"));
        assert_eq!(write.password_confirm.as_deref(), Some("secret123"));
    }

    #[test]
    fn unchecked_verified_box_is_false() {
        let mut f = form(Some("secret123"));
        f.verified = None;
        assert!(!f.coerce(true).unwrap().verified);
    }
}

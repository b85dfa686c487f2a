use std::sync::RwLock;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::StoreError;

/// HTTP client for the remote store's REST collections API.
///
/// The admin bearer token is obtained once in [`StoreClient::connect`] and
/// held for the process lifetime. [`StoreClient::reauthenticate`] re-runs
/// the admin auth against the stored credentials; nothing triggers it on
/// token expiry yet, so a store restart that invalidates tokens requires a
/// service restart.
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
    admin_email: String,
    admin_password: String,
    token: RwLock<String>,
}

/// Pagination, sort and filter parameters for collection listings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "perPage", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// One page of a collection listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListPage<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(rename = "perPage", default)]
    pub per_page: u32,
    #[serde(rename = "totalItems", default)]
    pub total_items: i64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Result of an end-user auth-with-password call: the user's own bearer
/// token plus their record.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAuth {
    pub token: String,
    pub record: serde_json::Value,
}

/// File attachment passed through to the store as a multipart part.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub field: String,
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    identity: &'a str,
    password: &'a str,
}

impl StoreClient {
    /// Build the client and perform the service-level admin auth.
    pub async fn connect(
        base_url: &str,
        admin_email: &str,
        admin_password: &str,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let client = Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_email: admin_email.to_string(),
            admin_password: admin_password.to_string(),
            token: RwLock::new(String::new()),
        };
        client.reauthenticate().await?;
        Ok(client)
    }

    /// Re-run the admin auth and replace the held bearer token.
    pub async fn reauthenticate(&self) -> Result<(), StoreError> {
        let url = format!("{}/api/admins/auth-with-password", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&Credentials {
                identity: &self.admin_email,
                password: &self.admin_password,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Unauthorized);
        }

        #[derive(Deserialize)]
        struct AdminAuth {
            token: String,
        }
        let auth: AdminAuth = response.json().await?;
        *self.token.write().expect("token lock poisoned") = auth.token;
        Ok(())
    }

    /// Authenticate an end user against an auth collection. Failures are
    /// reported uniformly as `Unauthorized` so callers cannot distinguish
    /// unknown accounts from wrong passwords.
    pub async fn auth_user_with_password(
        &self,
        collection: &str,
        identity: &str,
        password: &str,
    ) -> Result<UserAuth, StoreError> {
        let url = format!(
            "{}/api/collections/{}/auth-with-password",
            self.base_url, collection
        );
        let response = self
            .http
            .post(&url)
            .json(&Credentials { identity, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Unauthorized);
        }
        Ok(response.json().await?)
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &ListQuery,
    ) -> Result<ListPage<T>, StoreError> {
        let response = self
            .http
            .get(self.records_url(collection))
            .header(AUTHORIZATION, self.bearer())
            .query(query)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn get_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<T, StoreError> {
        let response = self
            .http
            .get(self.record_url(collection, id))
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn create<T: DeserializeOwned, B: Serialize>(
        &self,
        collection: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .http
            .post(self.records_url(collection))
            .header(AUTHORIZATION, self.bearer())
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn update<T: DeserializeOwned, B: Serialize>(
        &self,
        collection: &str,
        id: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .http
            .patch(self.record_url(collection, id))
            .header(AUTHORIZATION, self.bearer())
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(self.record_url(collection, id))
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::rejection(
            status,
            response.text().await.unwrap_or_default(),
        ))
    }

    /// Create with file attachments. Scalar fields ride as multipart text
    /// parts; file bytes are forwarded without further buffering.
    pub async fn create_multipart<T: DeserializeOwned>(
        &self,
        collection: &str,
        fields: Vec<(String, String)>,
        files: Vec<UploadFile>,
    ) -> Result<T, StoreError> {
        let form = Self::multipart_form(fields, files)?;
        let response = self
            .http
            .post(self.records_url(collection))
            .header(AUTHORIZATION, self.bearer())
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Update with file attachments, same shape as [`Self::create_multipart`].
    pub async fn update_multipart<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
        fields: Vec<(String, String)>,
        files: Vec<UploadFile>,
    ) -> Result<T, StoreError> {
        let form = Self::multipart_form(fields, files)?;
        let response = self
            .http
            .patch(self.record_url(collection, id))
            .header(AUTHORIZATION, self.bearer())
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    fn multipart_form(
        fields: Vec<(String, String)>,
        files: Vec<UploadFile>,
    ) -> Result<reqwest::multipart::Form, StoreError> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }
        for file in files {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.filename)
                .mime_str(&file.content_type)?;
            form = form.part(file.field, part);
        }
        Ok(form)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token.read().expect("token lock poisoned"))
    }

    fn records_url(&self, collection: &str) -> String {
        format!("{}/api/collections/{}/records", self.base_url, collection)
    }

    fn record_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.records_url(collection), id)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }
        Err(Self::rejection(
            status,
            response.text().await.unwrap_or_default(),
        ))
    }

    fn rejection(status: reqwest::StatusCode, body: String) -> StoreError {
        match status.as_u16() {
            401 | 403 => StoreError::Unauthorized,
            404 => StoreError::NotFound,
            status => {
                let message = serde_json::from_str::<serde_json::Value>(&body)
                    .ok()
                    .and_then(|v| {
                        v.get("message")
                            .and_then(|m| m.as_str())
                            .map(str::to_string)
                    })
                    .unwrap_or(body);
                StoreError::Rejected { status, message }
            }
        }
    }
}

/// Escape a value for interpolation into a store filter expression, e.g.
/// `customer = "<id>"`.
pub fn escape_filter_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_values_escape_embedded_quotes() {
        assert_eq!(escape_filter_value("plain"), "plain");
        assert_eq!(escape_filter_value(r#"a"b"#), r#"a\"b"#);
        assert_eq!(escape_filter_value(r"a\b"), r"a\\b");
    }

    #[test]
    fn rejection_maps_the_error_taxonomy() {
        let not_found =
            StoreClient::rejection(reqwest::StatusCode::NOT_FOUND, String::new());
        assert!(not_found.is_not_found());

        let unauthorized =
            StoreClient::rejection(reqwest::StatusCode::FORBIDDEN, String::new());
        assert!(matches!(unauthorized, StoreError::Unauthorized));

        let rejected = StoreClient::rejection(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"code":400,"message":"Failed to create record."}"#.to_string(),
        );
        match rejected {
            StoreError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Failed to create record.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejection_falls_back_to_the_raw_body() {
        let rejected = StoreClient::rejection(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "boom".to_string(),
        );
        match rejected {
            StoreError::Rejected { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn list_query_serializes_only_set_parameters() {
        let query = ListQuery {
            per_page: Some(200),
            sort: Some("-updated".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["perPage"], 200);
        assert_eq!(json["sort"], "-updated");
        assert!(json.get("page").is_none());
        assert!(json.get("filter").is_none());
    }
}

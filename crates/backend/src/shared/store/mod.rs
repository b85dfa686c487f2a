pub mod client;
pub mod error;

use once_cell::sync::OnceCell;

use crate::shared::config::Config;

pub use client::{ListPage, ListQuery, StoreClient, UploadFile, UserAuth};
pub use error::StoreError;

static STORE: OnceCell<StoreClient> = OnceCell::new();

/// Authenticate against the remote store with the configured admin
/// credentials and install the client process-wide. Called once from main;
/// a failed admin auth aborts startup.
pub async fn initialize_store(config: &Config) -> anyhow::Result<()> {
    let client = StoreClient::connect(
        &config.store.url,
        &config.store.admin_email,
        &config.store.admin_password,
    )
    .await
    .map_err(|e| anyhow::anyhow!("store admin auth failed: {e}"))?;

    STORE
        .set(client)
        .map_err(|_| anyhow::anyhow!("Store client already initialized"))?;
    Ok(())
}

pub fn get_store() -> &'static StoreClient {
    STORE.get().expect("Store client has not been initialized")
}

use once_cell::sync::OnceCell;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub ids: IdsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Remote store endpoint and the service-level admin credentials used for
/// every CRUD call.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub admin_email: String,
    pub admin_password: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionConfig {
    /// Session signing secret. Generated at startup when unset, which
    /// invalidates existing sessions on restart.
    #[serde(default)]
    pub secret: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IdsConfig {
    /// Year used in generated `PROD_`/`CUST_` identifier prefixes.
    #[serde(default = "default_year")]
    pub current_year: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

impl Default for IdsConfig {
    fn default() -> Self {
        Self { current_year: default_year() }
    }
}

fn default_port() -> u16 {
    5050
}

fn default_year() -> String {
    "2025".to_string()
}

/// Default configuration embedded in the binary.
const DEFAULT_CONFIG: &str = r#"
[server]
port = 5050

[store]
url = "http://127.0.0.1:8090"
admin_email = "admin@example.com"
admin_password = "changeme"

[ids]
current_year = "2025"
"#;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load configuration from config.toml next to the executable, falling back
/// to the embedded default, then apply environment overrides.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    apply_env_overrides(&mut config);
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Deployment overrides. Variable names follow the store terminology:
/// STORE_URL, STORE_ADMIN_EMAIL, STORE_ADMIN_PASSWORD, SESSION_SECRET,
/// CURRENT_YEAR, PORT.
fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = std::env::var("STORE_URL") {
        config.store.url = url;
    }
    if let Ok(email) = std::env::var("STORE_ADMIN_EMAIL") {
        config.store.admin_email = email;
    }
    if let Ok(password) = std::env::var("STORE_ADMIN_PASSWORD") {
        config.store.admin_password = password;
    }
    if let Ok(secret) = std::env::var("SESSION_SECRET") {
        config.session.secret = Some(secret);
    }
    if let Ok(year) = std::env::var("CURRENT_YEAR") {
        config.ids.current_year = year;
    }
    if let Ok(port) = std::env::var("PORT") {
        if let Ok(port) = port.parse() {
            config.server.port = port;
        }
    }
}

pub fn init_config(config: Config) -> anyhow::Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Config already initialized"))
}

pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 5050);
        assert_eq!(config.ids.current_year, "2025");
        assert!(config.session.secret.is_none());
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config: Config = toml::from_str(
            r#"
            [store]
            url = "http://store.internal:8090"
            admin_email = "svc@internal"
            admin_password = "pw"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 5050);
        assert_eq!(config.ids.current_year, "2025");
    }

    #[test]
    fn env_overrides_take_precedence() {
        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        std::env::set_var("CURRENT_YEAR", "2031");
        std::env::set_var("STORE_URL", "http://other:9000");
        apply_env_overrides(&mut config);
        std::env::remove_var("CURRENT_YEAR");
        std::env::remove_var("STORE_URL");
        assert_eq!(config.ids.current_year, "2031");
        assert_eq!(config.store.url, "http://other:9000");
    }
}

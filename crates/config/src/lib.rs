use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "zenith.toml",
    "config/zenith.toml",
    "crates/config/zenith.toml",
    "../zenith.toml",
    "../config/zenith.toml",
    "../crates/config/zenith.toml",
    "backend/zenith.toml",
    "backend/config/zenith.toml",
    "backend/crates/config/zenith.toml",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub listings: ListingsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            listings: ListingsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://zenith.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_session_ttl")]
    pub session_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: 86_400,
        }
    }
}

impl AuthConfig {
    fn default_session_ttl() -> u64 {
        86_400
    }
}

/// Paging limits applied to marketplace browse endpoints.
///
/// ```
/// use zenith_config::ListingsConfig;
///
/// let listings = ListingsConfig::default();
/// assert_eq!(listings.default_page_size, 20);
/// assert!(listings.default_page_size <= listings.max_page_size);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsConfig {
    #[serde(default = "ListingsConfig::default_page_size")]
    pub default_page_size: u32,
    #[serde(default = "ListingsConfig::default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            default_page_size: Self::default_page_size(),
            max_page_size: Self::default_max_page_size(),
        }
    }
}

impl ListingsConfig {
    const fn default_page_size() -> u32 {
        20
    }

    const fn default_max_page_size() -> u32 {
        100
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use zenith_config::load;
///
/// std::env::remove_var("ZENITH_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let db_max = defaults.database.max_connections as i64;
    let session_ttl = defaults.auth.session_ttl_seconds;
    let session_ttl_i64 = if session_ttl > i64::MAX as u64 {
        i64::MAX
    } else {
        session_ttl as i64
    };

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("http.address", defaults.http.address.clone())
        .unwrap()
        .set_default("http.port", i64::from(defaults.http.port))
        .unwrap()
        .set_default("database.url", defaults.database.url.clone())
        .unwrap()
        .set_default("database.max_connections", db_max)
        .unwrap()
        .set_default("auth.session_ttl_seconds", session_ttl_i64)
        .unwrap()
        .set_default(
            "listings.default_page_size",
            i64::from(defaults.listings.default_page_size),
        )
        .unwrap()
        .set_default(
            "listings.max_page_size",
            i64::from(defaults.listings.max_page_size),
        )
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("ZENITH").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ZENITH_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ZENITH_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.auth.session_ttl_seconds > i64::MAX as u64 {
        config.auth.session_ttl_seconds = i64::MAX as u64;
    }

    if config.listings.default_page_size == 0 {
        config.listings.default_page_size = ListingsConfig::default_page_size();
    }
    if config.listings.max_page_size < config.listings.default_page_size {
        config.listings.max_page_size = config.listings.default_page_size;
    }

    debug!(?config, "loaded backend configuration");
    Ok(config)
}

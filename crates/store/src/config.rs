use std::time::Duration;

use reqwest::Url;

use crate::flavor::StoreFlavor;

/// mockapi.io collection used when `STORE_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://630006689350a1e548e97a11.mockapi.io/Dinosaur";

/// Where records are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// A remote JSON CRUD resource.
    Remote { base_url: Url, flavor: StoreFlavor },
    /// Records kept in process; lost on restart.
    Memory,
}

/// Record store configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Per-request timeout for the remote store.
    pub timeout: Duration,
}

impl StoreConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                              |
    /// |----------------------|--------------------------------------|
    /// | `STORE_BACKEND`      | `remote` (or `memory`)               |
    /// | `STORE_BASE_URL`     | [`DEFAULT_BASE_URL`]                 |
    /// | `STORE_FLAVOR`       | `mockapi` (or `crudcrud`)            |
    /// | `STORE_TIMEOUT_SECS` | `30`                                 |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    ///
    /// Panics on invalid values so misconfiguration fails at startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend_name = lookup("STORE_BACKEND").unwrap_or_else(|| "remote".into());

        let backend = match backend_name.trim().to_ascii_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            "remote" => {
                let raw = lookup("STORE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
                let base_url = parse_base_url(&raw)
                    .unwrap_or_else(|e| panic!("STORE_BASE_URL is invalid: {e}"));

                let flavor: StoreFlavor = lookup("STORE_FLAVOR")
                    .unwrap_or_else(|| "mockapi".into())
                    .parse()
                    .unwrap_or_else(|e| panic!("STORE_FLAVOR is invalid: {e}"));

                StoreBackend::Remote { base_url, flavor }
            }
            other => panic!("STORE_BACKEND must be 'remote' or 'memory', got '{other}'"),
        };

        let timeout_secs: u64 = lookup("STORE_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("STORE_TIMEOUT_SECS must be a valid u64");

        Self {
            backend,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Parse a collection URL, trimming a trailing `/` and requiring http(s).
pub fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim().trim_end_matches('/')).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

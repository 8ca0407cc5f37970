//! Client configuration resolved once at startup.
//!
//! The platform, API base URL and session storage backend are decided here
//! and injected into the session store and API client, so no call site needs
//! to branch on the execution environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default request timeout applied to every backend call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Default key under which the session token is persisted.
pub const DEFAULT_SESSION_KEY: &str = "authToken";

/// Host the client is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Ios,
    Android,
    Desktop,
}

impl Platform {
    /// Detect the platform from the compile target.
    pub fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            Platform::Web
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else {
            Platform::Desktop
        }
    }

    /// Backend URL used when none is configured.
    ///
    /// The Android emulator reaches the host machine through 10.0.2.2.
    pub fn default_api_base_url(&self) -> &'static str {
        match self {
            Platform::Android => "http://10.0.2.2:3000",
            Platform::Web | Platform::Ios | Platform::Desktop => "http://localhost:3000",
        }
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(Platform::Web),
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "desktop" => Ok(Platform::Desktop),
            other => Err(ConfigError::Invalid("KCS_PLATFORM", other.to_string())),
        }
    }
}

/// Where the session token lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// In-process key-value storage, the browser local storage analogue.
    ///
    /// Outside a browser host nothing backs it, so the token only lives as
    /// long as the process. Use `File` for a session that survives restarts.
    Local,
    /// Async persistent key-value store backed by a JSON file.
    File { path: PathBuf },
}

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub platform: Platform,
    /// Backend origin, without the `/api` prefix
    pub api_base_url: String,
    pub storage_backend: StorageBackend,
    /// Key under which the token is persisted
    pub session_key: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            platform: Platform::Desktop,
            api_base_url: "http://localhost:3000".to_string(),
            storage_backend: StorageBackend::Local,
            session_key: DEFAULT_SESSION_KEY.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let platform = match lookup("KCS_PLATFORM") {
            Some(v) => v.parse()?,
            None => Platform::detect(),
        };

        let api_base_url = lookup("KCS_API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| platform.default_api_base_url().to_string());

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid("KCS_API_BASE_URL", api_base_url));
        }

        let storage_path = lookup("KCS_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("kcs-session.json"));

        let storage_backend = match lookup("KCS_STORAGE").map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "local" => StorageBackend::Local,
            Some(v) if v == "file" => StorageBackend::File { path: storage_path },
            Some(other) => return Err(ConfigError::Invalid("KCS_STORAGE", other)),
            None if platform == Platform::Web => StorageBackend::Local,
            None => StorageBackend::File { path: storage_path },
        };

        let request_timeout = match lookup("KCS_REQUEST_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("KCS_REQUEST_TIMEOUT_SECS", v.clone()))?;
                if secs == 0 {
                    return Err(ConfigError::Invalid("KCS_REQUEST_TIMEOUT_SECS", v));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            platform,
            api_base_url,
            storage_backend,
            session_key: lookup("KCS_SESSION_KEY")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SESSION_KEY.to_string()),
            request_timeout,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

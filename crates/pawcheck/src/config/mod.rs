use crate::allergy::DEFAULT_MIN_SUBSTRING_LEN;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub lookup: LookupConfig,
    pub profile: ProfileConfig,
    pub matcher: MatcherConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = LookupConfig::default();
        let timeout_secs = match env::var("APP_LOOKUP_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout)?,
            Err(_) => defaults.timeout.as_secs(),
        };
        let lookup = LookupConfig {
            go_upc_api_key: env::var("GO_UPC_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            go_upc_url: env::var("APP_GO_UPC_URL").unwrap_or(defaults.go_upc_url),
            open_pet_food_facts_url: env::var("APP_OPEN_PET_FOOD_FACTS_URL")
                .unwrap_or(defaults.open_pet_food_facts_url),
            open_food_facts_url: env::var("APP_OPEN_FOOD_FACTS_URL")
                .unwrap_or(defaults.open_food_facts_url),
            timeout: Duration::from_secs(timeout_secs),
        };

        let profile = ProfileConfig {
            path: env::var("APP_PROFILE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| ProfileConfig::default().path),
        };

        let min_substring_len = match env::var("APP_MIN_SUBSTRING_LEN") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidMinSubstringLen)?,
            Err(_) => DEFAULT_MIN_SUBSTRING_LEN,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            lookup,
            profile,
            matcher: MatcherConfig { min_substring_len },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Upstream product catalogues and request limits.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub go_upc_api_key: Option<String>,
    pub go_upc_url: String,
    pub open_pet_food_facts_url: String,
    pub open_food_facts_url: String,
    pub timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            go_upc_api_key: None,
            go_upc_url: "https://go-upc.com/api/v1".to_string(),
            open_pet_food_facts_url: "https://world.openpetfoodfacts.org".to_string(),
            open_food_facts_url: "https://world.openfoodfacts.org".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Where the single user profile is persisted.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    pub path: PathBuf,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("pawcheck-profile.json"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MatcherConfig {
    pub min_substring_len: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout,
    InvalidMinSubstringLen,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "APP_LOOKUP_TIMEOUT_SECS must be a positive number of seconds")
            }
            ConfigError::InvalidMinSubstringLen => {
                write!(f, "APP_MIN_SUBSTRING_LEN must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout
            | ConfigError::InvalidMinSubstringLen => None,
        }
    }
}

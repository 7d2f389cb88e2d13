use metrics_exporter_prometheus::PrometheusHandle;
use pawcheck::allergy::AllergenMatcher;
use pawcheck::config::AppConfig;
use pawcheck::error::AppError;
use pawcheck::product::ProductLookup;
use pawcheck::profile::JsonFileProfileStore;
use pawcheck::scan::ScanService;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type FileScanService = ScanService<JsonFileProfileStore>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wires the file-backed profile store, configured catalogue chain, and
/// matcher threshold into one service shared by the CLI and HTTP server.
pub(crate) fn build_scan_service(config: &AppConfig) -> Result<Arc<FileScanService>, AppError> {
    let profiles = Arc::new(JsonFileProfileStore::new(config.profile.path.clone()));
    let lookup = Arc::new(ProductLookup::from_config(&config.lookup)?);
    let matcher = AllergenMatcher::with_min_substring_len(config.matcher.min_substring_len);

    Ok(Arc::new(ScanService::new(profiles, lookup, matcher)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawcheck::config::{
        AppEnvironment, LookupConfig, MatcherConfig, ProfileConfig, ServerConfig, TelemetryConfig,
    };
    use pawcheck::product::ProductSource;

    #[test]
    fn builds_service_from_default_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig {
            environment: AppEnvironment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            lookup: LookupConfig::default(),
            profile: ProfileConfig {
                path: dir.path().join("profile.json"),
            },
            matcher: MatcherConfig {
                min_substring_len: 6,
            },
        };

        let service = build_scan_service(&config).expect("service builds");
        let profile = service.profile().expect("default profile");
        assert_eq!(profile.dog_name, "My Dog");

        let lookup = ProductLookup::from_config(&config.lookup).expect("lookup builds");
        assert_eq!(
            lookup.sources(),
            vec![ProductSource::OpenPetFoodFacts, ProductSource::OpenFoodFacts]
        );
    }
}

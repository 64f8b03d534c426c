//! EHR record query service
//!
//! Mock electronic health record backend serving patient summaries, lab
//! history, draft medication orders and evidence search over HTTP.

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod telemetry;

pub use error::ServiceError;

/// Application configuration
pub mod config {
    use ::config::{Config, ConfigError, Environment, File, Map};
    use serde::Deserialize;

    #[derive(Debug, Clone, Deserialize)]
    pub struct Settings {
        pub server: ServerSettings,
        /// `*` or a comma-separated list of allowed CORS origins.
        pub allow_origins: String,
        /// JSON dataset to serve instead of the built-in one.
        pub fixture_path: Option<String>,
        pub log_format: LogFormat,
        #[serde(default)]
        pub labs: LabSettings,
        #[serde(default)]
        pub evidence: EvidenceSettings,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ServerSettings {
        pub host: String,
        pub port: u16,
        pub workers: Option<usize>,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct LabSettings {
        pub default_last_n: Option<usize>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct EvidenceSettings {
        pub max_nearby_trials: usize,
    }

    impl Default for EvidenceSettings {
        fn default() -> Self {
            Self {
                max_nearby_trials: 2,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum LogFormat {
        Pretty,
        Json,
    }

    impl Settings {
        pub fn allowed_origins(&self) -> Vec<String> {
            self.allow_origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect()
        }
    }

    /// Load configuration from defaults, `config/` files and `EHR_*` variables.
    pub fn load_config() -> Result<Settings, ConfigError> {
        let env = std::env::var("EHR_ENV").unwrap_or_else(|_| "development".into());
        build(&env, None)
    }

    /// `vars` replaces the process environment when given.
    pub fn build(env: &str, vars: Option<Map<String, String>>) -> Result<Settings, ConfigError> {
        Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8001)?
            .set_default("allow_origins", "*")?
            .set_default("log_format", "pretty")?
            .set_default("evidence.max_nearby_trials", 2)?
            .add_source(File::with_name("config/default").required(false))
            // Override with environment-specific settings
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Override with environment variables
            .add_source(
                Environment::with_prefix("EHR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?
            .try_deserialize()
    }

}

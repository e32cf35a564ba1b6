use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub log_level: String,
    pub regions_path: PathBuf,
    pub directory_api_key: Option<String>,
    /// Overrides the built-in directory provider base URL when set.
    pub directory_base_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub directory_request_timeout_secs: u64,
    pub directory_user_agent: String,
    pub directory_max_retries: u32,
    pub directory_retry_backoff_base_ms: u64,
    /// Minimum delay between single-record imports within a batch.
    pub import_item_delay_ms: u64,
    /// Minimum delay between region sweeps.
    pub import_region_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("regions_path", &self.regions_path)
            .field("database_url", &"[redacted]")
            .field(
                "directory_api_key",
                &self.directory_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("directory_base_url", &self.directory_base_url)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "directory_request_timeout_secs",
                &self.directory_request_timeout_secs,
            )
            .field("directory_user_agent", &self.directory_user_agent)
            .field("directory_max_retries", &self.directory_max_retries)
            .field(
                "directory_retry_backoff_base_ms",
                &self.directory_retry_backoff_base_ms,
            )
            .field("import_item_delay_ms", &self.import_item_delay_ms)
            .field("import_region_delay_ms", &self.import_region_delay_ms)
            .finish()
    }
}

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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

/// Process-level settings read from the environment.
///
/// Source lists and keyword tables live in [`crate::SourcesConfig`]; this
/// struct only carries where to find them and how to talk to upstreams.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub sources_path: PathBuf,
    /// Base URL of the structured-search (GDELT DOC 2.0) API, without the
    /// trailing `/doc` path segment.
    pub search_base_url: String,
    /// Pause inserted between consecutive categories during a full run.
    pub category_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

//! Service configuration.
//!
//! [`Config::load`] layers, from lowest to highest precedence: the embedded
//! defaults, an optional TOML file, and `COURSE_SEARCH__<SECTION>__<KEY>`
//! environment variables. [`Config::defaults`] returns the embedded defaults
//! without touching the filesystem or environment (useful in tests).

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
bind = "127.0.0.1:8080"

[backend]
kind = "elasticsearch"

[elasticsearch]
url        = "http://localhost:9200"
index      = "courses"
timeout_ms = 5000

[catalog]
load_on_startup = true
sample_data     = "data/sample_courses.json"
"#;

const ENV_PREFIX: &str = "COURSE_SEARCH";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub elasticsearch: ElasticsearchConfig,
    pub catalog: CatalogConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

/// `[backend]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub kind: BackendKind,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Remote Elasticsearch cluster.
    Elasticsearch,
    /// In-process index, lost on shutdown.
    Memory,
}

/// `[elasticsearch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ElasticsearchConfig {
    pub url: String,
    pub index: String,
    pub timeout_ms: u64,
}

impl ElasticsearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// `[catalog]` section: sample data indexed at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub load_on_startup: bool,
    pub sample_data: String,
}

impl Config {
    /// Load the embedded defaults, overlay `path` if it exists, then the
    /// environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

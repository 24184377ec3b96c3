use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr, time::Duration};
use url::Url;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// When set, profiles are stored in Redis instead of process memory.
    #[serde(default)]
    pub redis_url: Option<String>,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Base URL used to build shareable profile links.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    #[serde(default = "default_draft_history_limit")]
    pub draft_history_limit: usize,

    /// Idle minutes before an unsaved draft session is dropped.
    #[serde(default = "default_draft_ttl_minutes")]
    pub draft_ttl_minutes: u64,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Roster-Profiles".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_public_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}
fn default_draft_history_limit() -> usize {
    50
}
fn default_draft_ttl_minutes() -> u64 {
    60
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(Environment::with_prefix("APP").prefix_separator("_").separator("__").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        if config.redis_url.is_none() {
            config.redis_url = env::var("APP_REDIS_URL").ok().filter(|url| !url.trim().is_empty());
        }

        config.validate()?;
        Ok(config)
    }

    /// Defaults for tests and local tooling; no files or env vars are read.
    pub fn for_testing() -> Self {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "Roster Profiles Test".to_string(),
            port: 0,
            host: default_host(),
            worker_count: 1,
            redis_url: None,
            cors_allowed_origins: default_cors_origins(),
            public_base_url: "http://roster.test".to_string(),
            draft_history_limit: 10,
            draft_ttl_minutes: 5,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.draft_history_limit == 0 {
            errors.push("DRAFT_HISTORY_LIMIT must be greater than zero");
        }
        if self.draft_ttl_minutes == 0 {
            errors.push("DRAFT_TTL_MINUTES must be greater than zero");
        }
        match Url::parse(&self.public_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => errors.push("PUBLIC_BASE_URL must be an http(s) URL"),
        }
        if self.redis_url.as_deref().is_some_and(|url| !url.starts_with("redis")) {
            errors.push("REDIS_URL must use the redis:// or rediss:// scheme");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn draft_ttl(&self) -> Duration {
        Duration::from_secs(self.draft_ttl_minutes * 60)
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        match self {
            None => "[NOT SET]",
            Some(_) => "[REDACTED]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("redis_url", &self.redis_url.redact())
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("public_base_url", &self.public_base_url)
            .field("draft_history_limit", &self.draft_history_limit)
            .field("draft_ttl_minutes", &self.draft_ttl_minutes)
            .finish()
    }
}

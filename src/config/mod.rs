#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{ApplierError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Top-level run configuration, loaded once from TOML at start.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_seconds: 10 }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub apply_delay_seconds: u64,
    pub platform_delay_seconds: u64,
    pub max_applications_per_platform: usize,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            apply_delay_seconds: 2,
            platform_delay_seconds: 5,
            max_applications_per_platform: 3,
        }
    }
}

impl PacingConfig {
    pub fn apply_delay(&self) -> Duration {
        Duration::from_secs(self.apply_delay_seconds)
    }

    pub fn platform_delay(&self) -> Duration {
        Duration::from_secs(self.platform_delay_seconds)
    }

    /// Pacing with every delay zeroed.
    pub fn immediate(max_applications_per_platform: usize) -> Self {
        Self {
            apply_delay_seconds: 0,
            platform_delay_seconds: 0,
            max_applications_per_platform,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

/// A job board reachable over HTTP with a bearer token.
#[derive(Clone, Deserialize)]
pub struct Platform {
    pub name: String,
    pub endpoint: String,
    pub token: String,
    pub apply_url: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Platform {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            token: token.into(),
            apply_url: None,
            enabled: true,
        }
    }

    pub fn with_apply_url(mut self, apply_url: impl Into<String>) -> Self {
        self.apply_url = Some(apply_url.into());
        self
    }

    /// `https://<name>.com/api/apply` unless overridden.
    pub fn apply_url(&self) -> String {
        match &self.apply_url {
            Some(url) => url.clone(),
            None => format!("https://{}.com/api/apply", self.name.to_lowercase()),
        }
    }
}

// Tokens never reach the logs, even at debug level.
impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .field("apply_url", &self.apply_url)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed)?)
    }

    /// Replaces `${VAR}` with the environment value. Unknown variables are
    /// left in place so validation can name them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| {
            ApplierError::InvalidConfigValueError {
                field: "env_substitution".to_string(),
                value: String::new(),
                reason: e.to_string(),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn enabled_platforms(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(|p| p.enabled)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        if self.platforms.is_empty() {
            return Err(ApplierError::MissingConfigError {
                field: "platforms".to_string(),
            });
        }

        validation::validate_positive_number("http.timeout_seconds", self.http.timeout_seconds, 1)?;
        validation::validate_log_level("logging.level", &self.logging.level)?;
        validation::validate_unique_names(
            "platforms.name",
            self.platforms.iter().map(|p| p.name.as_str()),
        )?;

        for platform in &self.platforms {
            validation::validate_non_empty_string("platforms.name", &platform.name)?;
            validation::validate_url("platforms.endpoint", &platform.endpoint)?;
            validation::validate_url("platforms.apply_url", &platform.apply_url())?;
            if platform.enabled {
                validation::validate_non_empty_string("platforms.token", &platform.token)?;
                validation::validate_resolved("platforms.token", &platform.token)?;
            }
        }

        Ok(())
    }
}

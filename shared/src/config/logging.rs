//! Logging configuration consumed by the tracing subscriber

use serde::{Deserialize, Serialize};

use super::environment::Environment;

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" | "text" => Ok(LogFormat::Compact),
            other => Err(format!("Unknown log format: {}", other)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `tk_core=debug,warn`
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// ANSI colours (pretty and compact formats)
    #[serde(default)]
    pub colored: bool,

    /// File and line of each event
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Profile for an environment: verbose and readable locally, JSON elsewhere
    pub fn for_environment(env: Environment) -> Self {
        let local = env == Environment::Development;
        Self {
            level: match env {
                Environment::Development => "debug",
                Environment::Staging => "info",
                Environment::Production => "warn",
            }
            .to_string(),
            format: if local { LogFormat::Pretty } else { LogFormat::Json },
            colored: local,
            source_location: local,
        }
    }

    /// Environment profile with `LOG_LEVEL` and `LOG_FORMAT` overrides
    pub fn from_env(env: Environment) -> Self {
        let profile = Self::for_environment(env);
        Self {
            level: std::env::var("LOG_LEVEL")
                .ok()
                .filter(|level| !level.trim().is_empty())
                .unwrap_or(profile.level),
            format: super::env_parse("LOG_FORMAT").unwrap_or(profile.format),
            ..profile
        }
    }
}

fn default_log_format() -> LogFormat {
    LogFormat::Json
}

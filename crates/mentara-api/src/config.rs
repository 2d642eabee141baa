use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use jiff::SignedDuration;
use mentara_agent::client::DEFAULT_AGENT_URL;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub agent_url: String,
    pub jwt_secret: String,
    /// Unset means records live in memory only.
    pub data_dir: Option<PathBuf>,
    /// User ids granted the admin role at startup.
    pub admin_ids: Vec<String>,
    pub session_ttl: SignedDuration,
    pub agent_timeout: Duration,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = match get("MENTARA_BIND_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "MENTARA_BIND_ADDR",
                value,
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let jwt_secret = get("MENTARA_JWT_SECRET").ok_or(ConfigError::Missing("MENTARA_JWT_SECRET"))?;

        let admin_ids = get("MENTARA_ADMIN_IDS")
            .map(|ids| {
                ids.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let session_ttl_minutes = positive(get("MENTARA_SESSION_TTL_MINUTES"), "MENTARA_SESSION_TTL_MINUTES", 30)?;
        let agent_timeout_secs = positive(get("MENTARA_AGENT_TIMEOUT_SECS"), "MENTARA_AGENT_TIMEOUT_SECS", 30)?;

        Ok(Self {
            bind_addr,
            agent_url: get("AGENT_SERVICE_URL").unwrap_or_else(|| DEFAULT_AGENT_URL.to_string()),
            jwt_secret,
            data_dir: get("MENTARA_DATA_DIR").map(PathBuf::from),
            admin_ids,
            session_ttl: SignedDuration::from_mins(session_ttl_minutes as i64),
            agent_timeout: Duration::from_secs(agent_timeout_secs),
        })
    }
}

fn positive(value: Option<String>, var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::Invalid { var, value }),
        },
    }
}

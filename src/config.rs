use std::fmt;
use std::path::PathBuf;

use url::Url;

use crate::relay::telegram::DEFAULT_API_BASE;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_SCHEDULER_URL: &str = "https://calendly.com/romanzakharenko-r";

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidUrl { var: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort(v) => write!(f, "PORT must be a port number, got '{v}'"),
            ConfigError::InvalidUrl { var, reason } => write!(f, "{var} is not a valid URL: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Process configuration, read once at startup and passed down explicitly.
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub dist_dir: PathBuf,

    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_api_base: String,

    pub scheduler_url: Url,

    /// Cookie-session key; must be at least 64 bytes to be used.
    pub session_key: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dist_dir", &self.dist_dir)
            .field("telegram_bot_token", &self.telegram_bot_token.as_ref().map(|_| "<set>"))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("telegram_api_base", &self.telegram_api_base)
            .field("scheduler_url", &self.scheduler_url.as_str())
            .field("session_key", &self.session_key.as_ref().map(|_| "<set>"))
            .finish()
    }
}

impl Config {
    /// Load from the process environment (after `.env`, if any, has been applied).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidPort(v))?,
            None => DEFAULT_PORT,
        };

        let scheduler = get("SCHEDULER_URL").unwrap_or_else(|| DEFAULT_SCHEDULER_URL.to_string());
        let scheduler_url = Url::parse(&scheduler).map_err(|e| ConfigError::InvalidUrl {
            var: "SCHEDULER_URL",
            reason: e.to_string(),
        })?;

        let telegram_api_base = get("TELEGRAM_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Url::parse(&telegram_api_base).map_err(|e| ConfigError::InvalidUrl {
            var: "TELEGRAM_API_BASE",
            reason: e.to_string(),
        })?;

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            dist_dir: PathBuf::from(get("DIST_DIR").unwrap_or_else(|| "dist".to_string())),
            telegram_bot_token: get("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: get("TELEGRAM_CHAT_ID"),
            telegram_api_base,
            scheduler_url,
            session_key: get("SESSION_KEY"),
        })
    }

    pub fn site_settings(&self) -> SiteSettings {
        SiteSettings {
            scheduler_url: self.scheduler_url.clone(),
        }
    }
}

/// The slice of configuration the booking page needs.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub scheduler_url: Url,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            scheduler_url: Url::parse(DEFAULT_SCHEDULER_URL).expect("default scheduler URL parses"),
        }
    }
}

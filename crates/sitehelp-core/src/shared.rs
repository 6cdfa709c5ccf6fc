//! Shared types used across all sitehelp crates.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// First bot message shown when a session's panel is opened.
pub const DEFAULT_GREETING: &str = "Hey! Ask me about hours, pricing, booking, or services.";

/// Fixed user-visible message when the responder fails.
pub const APOLOGY_MESSAGE: &str = "Sorry — something went wrong. Try again.";

const ENV_CONFIG_PATH: &str = "SITEHELP_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/sitehelp.toml";
const ENV_PREFIX: &str = "SITEHELP";

/// Which responder strategy answers the widget. Chosen once, at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponderMode {
    /// In-process FAQ engine with topic memory.
    #[default]
    Local,
    /// HTTP POST to a remote chat API.
    Remote,
}

impl ResponderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponderMode::Local => "local",
            ResponderMode::Remote => "remote",
        }
    }
}

/// Widget configuration (identity, responder selection, gateway). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Name shown in the panel header (e.g. "Site Helper").
    pub bot_name: String,
    /// Subtitle under the name.
    pub bot_subtitle: String,
    /// Greeting rendered once per session.
    pub greeting: String,
    /// Responder strategy (`local` or `remote`).
    pub mode: ResponderMode,
    /// Remote chat endpoint used when `mode = "remote"`.
    pub endpoint: String,
    /// Artificial latency of the local engine, in milliseconds.
    pub reply_delay_ms: u64,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Gateway sessions unused for this many seconds are dropped with their memory.
    pub session_idle_secs: u64,
    /// Optional JSON knowledge base; the built-in FAQ is used when absent.
    #[serde(default)]
    pub kb_path: Option<String>,
    /// If true, `sitehelp-gateway` serves the widget assets from `frontend_dir`.
    #[serde(default)]
    pub frontend_enabled: bool,
    /// Directory holding the widget's `index.html` and assets.
    pub frontend_dir: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            bot_name: "Site Helper".to_string(),
            bot_subtitle: "Free demo (FAQ-based)".to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            mode: ResponderMode::Local,
            endpoint: "http://127.0.0.1:8001/api/chat".to_string(),
            reply_delay_ms: 350,
            port: 8001,
            session_idle_secs: 1800,
            kb_path: None,
            frontend_enabled: false,
            frontend_dir: "widget".to_string(),
        }
    }
}

impl WidgetConfig {
    /// The local engine's reply delay as a [`Duration`].
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// How long a gateway session may sit idle before it is evicted.
    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    /// Load config from file and environment. Precedence: `SITEHELP_*` env vars > TOML file
    /// (`SITEHELP_CONFIG` path, else `config/sitehelp.toml`) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_sources(Some(Path::new(&config_path)), Self::environment())
    }

    /// Load config from an explicit TOML file plus the process environment.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        Self::from_sources(Some(path.as_ref()), Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_sources(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("bot_name", defaults.bot_name)?
            .set_default("bot_subtitle", defaults.bot_subtitle)?
            .set_default("greeting", defaults.greeting)?
            .set_default("mode", defaults.mode.as_str())?
            .set_default("endpoint", defaults.endpoint)?
            .set_default("reply_delay_ms", defaults.reply_delay_ms as i64)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("session_idle_secs", defaults.session_idle_secs as i64)?
            .set_default("frontend_enabled", defaults.frontend_enabled)?
            .set_default("frontend_dir", defaults.frontend_dir)?;

        let builder = match path {
            Some(path) if path.exists() => builder.add_source(config::File::from(path)),
            _ => builder,
        };

        let built = builder.add_source(env).build()?;
        let config: Self = built.try_deserialize()?;
        tracing::debug!(
            target: "sitehelp::config",
            bot_name = %config.bot_name,
            mode = config.mode.as_str(),
            port = config.port,
            "Widget config loaded"
        );
        Ok(config)
    }
}

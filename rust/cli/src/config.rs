use serde::{Deserialize, Serialize};
use std::fs;

use luckydraw_engine::autodraw::{DEFAULT_INTERVAL_SECS, MAX_POLL_MS};
use luckydraw_engine::engine::DEFAULT_REVEAL_DELAY_MS;

pub const DEFAULT_STATE_PATH: &str = "luckydraw-state.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub state_path: String,
    pub seed: Option<u64>,
    pub auto_interval_secs: u32,
    pub reveal_delay_ms: u32,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub state_path: ValueSource,
    pub seed: ValueSource,
    pub auto_interval_secs: ValueSource,
    pub reveal_delay_ms: ValueSource,
    pub poll_interval_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            state_path: ValueSource::Default,
            seed: ValueSource::Default,
            auto_interval_secs: ValueSource::Default,
            reveal_delay_ms: ValueSource::Default,
            poll_interval_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_path: DEFAULT_STATE_PATH.into(),
            seed: None,
            auto_interval_secs: DEFAULT_INTERVAL_SECS,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS as u32,
            poll_interval_ms: MAX_POLL_MS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolves configuration: defaults, then the TOML file named by
/// `LUCKYDRAW_CONFIG`, then `LUCKYDRAW_*` environment overrides.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("LUCKYDRAW_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.state_path {
            cfg.state_path = v;
            sources.state_path = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.auto_interval_secs {
            cfg.auto_interval_secs = v;
            sources.auto_interval_secs = ValueSource::File;
        }
        if let Some(v) = f.reveal_delay_ms {
            cfg.reveal_delay_ms = v;
            sources.reveal_delay_ms = ValueSource::File;
        }
        if let Some(v) = f.poll_interval_ms {
            cfg.poll_interval_ms = v;
            sources.poll_interval_ms = ValueSource::File;
        }
    }

    if let Some(path) = env_value("LUCKYDRAW_STATE") {
        cfg.state_path = path;
        sources.state_path = ValueSource::Env;
    }
    if let Some(seed) = env_value("LUCKYDRAW_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(interval) = env_value("LUCKYDRAW_AUTO_INTERVAL") {
        cfg.auto_interval_secs = interval
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid auto-draw interval".into()))?;
        sources.auto_interval_secs = ValueSource::Env;
    }
    if let Some(delay) = env_value("LUCKYDRAW_REVEAL_DELAY_MS") {
        cfg.reveal_delay_ms = delay
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid reveal delay".into()))?;
        sources.reveal_delay_ms = ValueSource::Env;
    }
    if let Some(poll) = env_value("LUCKYDRAW_POLL_MS") {
        cfg.poll_interval_ms = poll
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid poll interval".into()))?;
        sources.poll_interval_ms = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    state_path: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    auto_interval_secs: Option<u32>,
    #[serde(default)]
    reveal_delay_ms: Option<u32>,
    #[serde(default)]
    poll_interval_ms: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.state_path.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: state_path must not be empty".into(),
        ));
    }
    if cfg.auto_interval_secs == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: auto_interval_secs must be >=1".into(),
        ));
    }
    if cfg.poll_interval_ms == 0 || cfg.poll_interval_ms > MAX_POLL_MS {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: poll_interval_ms must be between 1 and {}",
            MAX_POLL_MS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        let cfg = Config::default();
        assert!(validate(&cfg).is_ok());
        assert_eq!(cfg.state_path, "luckydraw-state.json");
        assert_eq!(cfg.auto_interval_secs, 10);
        assert_eq!(cfg.reveal_delay_ms, 800);
        assert_eq!(cfg.poll_interval_ms, 250);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let cfg = Config {
            auto_interval_secs: 0,
            ..Config::default()
        };
        let e = validate(&cfg).unwrap_err();
        assert!(e.to_string().contains("auto_interval_secs"));
    }

    #[test]
    fn poll_above_cap_is_rejected() {
        let cfg = Config {
            poll_interval_ms: 251,
            ..Config::default()
        };
        assert!(validate(&cfg).is_err());
        let cfg = Config {
            poll_interval_ms: 0,
            ..Config::default()
        };
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn file_config_accepts_partial_tables() {
        let f: FileConfig = toml::from_str("seed = 7\nreveal_delay_ms = 0\n").unwrap();
        assert_eq!(f.seed, Some(7));
        assert_eq!(f.reveal_delay_ms, Some(0));
        assert!(f.state_path.is_none());
    }
}

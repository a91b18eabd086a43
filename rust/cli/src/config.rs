use serde::{Deserialize, Serialize};
use spider_engine::deck::Level;
use spider_engine::history::DEFAULT_CAPACITY;
use spider_engine::solver::AUTOPLAY_INTERVAL;
use std::fs;
use std::path::PathBuf;

pub const CONFIG_ENV: &str = "SPIDER_CONFIG";
pub const LEVEL_ENV: &str = "SPIDER_LEVEL";
pub const SEED_ENV: &str = "SPIDER_SEED";
pub const SAVE_ENV: &str = "SPIDER_SAVE";
pub const AUTOPLAY_ENV: &str = "SPIDER_AUTOPLAY_MS";
pub const HISTORY_ENV: &str = "SPIDER_HISTORY_DEPTH";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub level: Level,
    pub seed: Option<u64>,
    pub save_path: PathBuf,
    pub autoplay_delay_ms: u64,
    pub history_depth: usize,
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
    pub level: ValueSource,
    pub seed: ValueSource,
    pub save_path: ValueSource,
    pub autoplay_delay_ms: ValueSource,
    pub history_depth: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            level: ValueSource::Default,
            seed: ValueSource::Default,
            save_path: ValueSource::Default,
            autoplay_delay_ms: ValueSource::Default,
            history_depth: ValueSource::Default,
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
            level: Level::Beginner,
            seed: None,
            save_path: PathBuf::from("spider-save.json"),
            autoplay_delay_ms: AUTOPLAY_INTERVAL.as_millis() as u64,
            history_depth: DEFAULT_CAPACITY,
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
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.level {
            cfg.level = v.parse().map_err(ConfigError::Invalid)?;
            sources.level = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.save_path {
            cfg.save_path = v;
            sources.save_path = ValueSource::File;
        }
        if let Some(v) = f.autoplay_delay_ms {
            cfg.autoplay_delay_ms = v;
            sources.autoplay_delay_ms = ValueSource::File;
        }
        if let Some(v) = f.history_depth {
            cfg.history_depth = v;
            sources.history_depth = ValueSource::File;
        }
    }

    if let Ok(level) = std::env::var(LEVEL_ENV)
        && !level.is_empty()
    {
        cfg.level = level.parse().map_err(ConfigError::Invalid)?;
        sources.level = ValueSource::Env;
    }
    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed '{}'", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(path) = std::env::var(SAVE_ENV)
        && !path.is_empty()
    {
        cfg.save_path = PathBuf::from(path);
        sources.save_path = ValueSource::Env;
    }
    if let Ok(ms) = std::env::var(AUTOPLAY_ENV)
        && !ms.is_empty()
    {
        cfg.autoplay_delay_ms = ms
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid autoplay delay '{}'", ms)))?;
        sources.autoplay_delay_ms = ValueSource::Env;
    }
    if let Ok(depth) = std::env::var(HISTORY_ENV)
        && !depth.is_empty()
    {
        cfg.history_depth = depth
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid history depth '{}'", depth)))?;
        sources.history_depth = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    save_path: Option<PathBuf>,
    #[serde(default)]
    autoplay_delay_ms: Option<u64>,
    #[serde(default)]
    history_depth: Option<usize>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.history_depth == 0 {
        return Err(ConfigError::Invalid("history_depth must be >=1".into()));
    }
    if cfg.save_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("save_path must not be empty".into()));
    }
    Ok(())
}

//! Layered simulation settings: defaults, then a TOML file named by
//! `POKERLAB_CONFIG`, then `POKERLAB_*` environment variables. Command-line
//! flags are applied on top by each command.

use pokerlab_engine::sampling::{
    DEFAULT_ITERATIONS, MAX_ITERATIONS, MAX_THREADS, MIN_ITERATIONS, SimConfig, TiePolicy,
};
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "POKERLAB_CONFIG";
pub const ITERATIONS_ENV: &str = "POKERLAB_ITERATIONS";
pub const SEED_ENV: &str = "POKERLAB_SEED";
pub const THREADS_ENV: &str = "POKERLAB_THREADS";
pub const TIE_POLICY_ENV: &str = "POKERLAB_TIE_POLICY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub iterations: u32,
    pub seed: Option<u64>,
    pub threads: usize,
    pub tie_policy: TiePolicy,
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
    pub iterations: ValueSource,
    pub seed: ValueSource,
    pub threads: ValueSource,
    pub tie_policy: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            iterations: ValueSource::Default,
            seed: ValueSource::Default,
            threads: ValueSource::Default,
            tie_policy: ValueSource::Default,
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
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            threads: 1,
            tie_policy: TiePolicy::Legacy,
        }
    }
}

impl Config {
    pub fn to_sim_config(&self) -> SimConfig {
        let mut sim = SimConfig::default()
            .with_iterations(self.iterations)
            .with_threads(self.threads)
            .with_tie_policy(self.tie_policy);
        sim.seed = self.seed;
        sim
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

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.iterations {
            cfg.iterations = v;
            sources.iterations = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.threads {
            cfg.threads = v;
            sources.threads = ValueSource::File;
        }
        if let Some(v) = f.tie_policy {
            cfg.tie_policy = v.parse().map_err(ConfigError::Invalid)?;
            sources.tie_policy = ValueSource::File;
        }
    }

    if let Ok(iterations) = std::env::var(ITERATIONS_ENV)
        && !iterations.is_empty()
    {
        cfg.iterations = iterations
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid iterations".into()))?;
        sources.iterations = ValueSource::Env;
    }
    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(threads) = std::env::var(THREADS_ENV)
        && !threads.is_empty()
    {
        cfg.threads = threads
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid threads".into()))?;
        sources.threads = ValueSource::Env;
    }
    if let Ok(policy) = std::env::var(TIE_POLICY_ENV)
        && !policy.is_empty()
    {
        cfg.tie_policy = policy.parse().map_err(ConfigError::Invalid)?;
        sources.tie_policy = ValueSource::Env;
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
    iterations: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    threads: Option<usize>,
    #[serde(default)]
    tie_policy: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&cfg.iterations) {
        return Err(ConfigError::Invalid(format!(
            "iterations must be between {} and {}",
            MIN_ITERATIONS, MAX_ITERATIONS
        )));
    }
    if cfg.threads == 0 || cfg.threads > MAX_THREADS {
        return Err(ConfigError::Invalid(format!(
            "threads must be between 1 and {}",
            MAX_THREADS
        )));
    }
    Ok(())
}

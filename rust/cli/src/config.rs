use bjtrainer_engine::cards::CARDS_PER_DECK;
use bjtrainer_engine::counting::CountingSystem;
use bjtrainer_engine::dealer::DealerPolicy;
use bjtrainer_engine::errors::GameError;
use bjtrainer_engine::shoe::ReshufflePolicy;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub decks: u8,
    pub penetration: f64,
    pub min_cards: u32,
    pub system: String,
    pub hit_soft_17: bool,
    pub min_bet: u32,
    pub max_bet: u32,
    pub bankroll: u32,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decks: 6,
            penetration: ReshufflePolicy::DEFAULT_PENETRATION,
            min_cards: ReshufflePolicy::DEFAULT_MIN_CARDS as u32,
            system: CountingSystem::HiLo.name().into(),
            hit_soft_17: true,
            min_bet: 10,
            max_bet: 500,
            bankroll: 1_000,
            seed: None,
        }
    }
}

impl Config {
    pub fn counting_system(&self) -> Result<CountingSystem, GameError> {
        CountingSystem::from_name(&self.system)
    }

    /// Reshuffle policy for a shoe of `total_cards`, with `penetration`
    /// overriding the configured value when given.
    pub fn reshuffle_policy(
        &self,
        penetration: Option<f64>,
        total_cards: usize,
    ) -> Result<ReshufflePolicy, GameError> {
        let policy = ReshufflePolicy::new(
            penetration.unwrap_or(self.penetration),
            self.min_cards as usize,
        )?;
        policy.check_fits(total_cards)?;
        Ok(policy)
    }

    pub fn dealer_policy(&self) -> DealerPolicy {
        DealerPolicy {
            hit_soft_17: self.hit_soft_17,
        }
    }
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
    pub decks: ValueSource,
    pub penetration: ValueSource,
    pub min_cards: ValueSource,
    pub system: ValueSource,
    pub hit_soft_17: ValueSource,
    pub min_bet: ValueSource,
    pub max_bet: ValueSource,
    pub bankroll: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            decks: ValueSource::Default,
            penetration: ValueSource::Default,
            min_cards: ValueSource::Default,
            system: ValueSource::Default,
            hit_soft_17: ValueSource::Default,
            min_bet: ValueSource::Default,
            max_bet: ValueSource::Default,
            bankroll: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
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

pub const CONFIG_ENV: &str = "BJTRAINER_CONFIG";

/// Resolves the configuration: defaults, then the TOML file named by
/// `BJTRAINER_CONFIG`, then `BJTRAINER_*` environment variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        apply_file(&mut cfg, &mut sources, f);
    }

    if let Some(seed) = env_value("BJTRAINER_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(decks) = env_value("BJTRAINER_DECKS") {
        cfg.decks = decks
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid decks: {}", decks)))?;
        sources.decks = ValueSource::Env;
    }
    if let Some(pen) = env_value("BJTRAINER_PENETRATION") {
        cfg.penetration = pen
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid penetration: {}", pen)))?;
        sources.penetration = ValueSource::Env;
    }
    if let Some(system) = env_value("BJTRAINER_SYSTEM") {
        cfg.system = system;
        sources.system = ValueSource::Env;
    }
    if let Some(h17) = env_value("BJTRAINER_HIT_SOFT_17") {
        cfg.hit_soft_17 = parse_bool(&h17)
            .ok_or_else(|| ConfigError::Invalid(format!("Invalid hit_soft_17: {}", h17)))?;
        sources.hit_soft_17 = ValueSource::Env;
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
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    decks: Option<u8>,
    #[serde(default)]
    penetration: Option<f64>,
    #[serde(default)]
    min_cards: Option<u32>,
    #[serde(default)]
    system: Option<String>,
    #[serde(default)]
    hit_soft_17: Option<bool>,
    #[serde(default)]
    min_bet: Option<u32>,
    #[serde(default)]
    max_bet: Option<u32>,
    #[serde(default)]
    bankroll: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
}

fn apply_file(cfg: &mut Config, sources: &mut ConfigSources, f: FileConfig) {
    if let Some(v) = f.decks {
        cfg.decks = v;
        sources.decks = ValueSource::File;
    }
    if let Some(v) = f.penetration {
        cfg.penetration = v;
        sources.penetration = ValueSource::File;
    }
    if let Some(v) = f.min_cards {
        cfg.min_cards = v;
        sources.min_cards = ValueSource::File;
    }
    if let Some(v) = f.system {
        cfg.system = v;
        sources.system = ValueSource::File;
    }
    if let Some(v) = f.hit_soft_17 {
        cfg.hit_soft_17 = v;
        sources.hit_soft_17 = ValueSource::File;
    }
    if let Some(v) = f.min_bet {
        cfg.min_bet = v;
        sources.min_bet = ValueSource::File;
    }
    if let Some(v) = f.max_bet {
        cfg.max_bet = v;
        sources.max_bet = ValueSource::File;
    }
    if let Some(v) = f.bankroll {
        cfg.bankroll = v;
        sources.bankroll = ValueSource::File;
    }
    if let Some(v) = f.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::File;
    }
}

/// Checks ranges after every layer has been applied. Command-line flags are
/// checked again by the command that uses them.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(1..=8).contains(&cfg.decks) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: decks must be between 1 and 8".into(),
        ));
    }
    if !(cfg.penetration > 0.0 && cfg.penetration <= 1.0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: penetration must be in (0, 1]".into(),
        ));
    }
    if cfg.min_cards as usize >= cfg.decks as usize * CARDS_PER_DECK {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: min_cards must be below {} for {} deck(s)",
            cfg.decks as usize * CARDS_PER_DECK,
            cfg.decks
        )));
    }
    if cfg.min_bet == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: min_bet must be >=1".into(),
        ));
    }
    if cfg.max_bet < cfg.min_bet {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_bet must be >= min_bet".into(),
        ));
    }
    if cfg.counting_system().is_err() {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown counting system '{}'",
            cfg.system
        )));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{ScoringWeights, UsageLimits};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub quota: QuotaSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Redis is optional; without it only the in-process cache is used
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_cookie_name() -> String { "token".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Maximum candidates loaded from the trip store per query
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            candidate_limit: default_candidate_limit(),
        }
    }
}

fn default_candidate_limit() -> usize { 500 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_destination_weight")]
    pub destination: u32,
    #[serde(default = "default_dates_weight")]
    pub dates: u32,
    #[serde(default = "default_budget_weight")]
    pub budget: u32,
    #[serde(default = "default_interests_weight")]
    pub interests: u32,
    #[serde(default = "default_travel_style_weight")]
    pub travel_style: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            destination: default_destination_weight(),
            dates: default_dates_weight(),
            budget: default_budget_weight(),
            interests: default_interests_weight(),
            travel_style: default_travel_style_weight(),
        }
    }
}

fn default_destination_weight() -> u32 { 40 }
fn default_dates_weight() -> u32 { 25 }
fn default_budget_weight() -> u32 { 10 }
fn default_interests_weight() -> u32 { 20 }
fn default_travel_style_weight() -> u32 { 5 }

impl WeightsConfig {
    /// Expand factor maxima into the full scoring table
    ///
    /// Lower tiers keep their default proportion of each factor's maximum,
    /// rounded down, so the stock config reproduces `ScoringWeights::default()`
    /// exactly. A non-zero maximum whose lowest tier would round to zero is
    /// rejected; a maximum of zero disables the factor.
    pub fn to_weights(&self) -> Result<ScoringWeights, ConfigError> {
        let total = self.destination + self.dates + self.budget + self.interests + self.travel_style;
        if total > 100 {
            return Err(ConfigError::Message(format!(
                "scoring weights must add up to at most 100, got {}",
                total
            )));
        }

        let scale = |max: u32, default_max: u32, tier: u32| max * tier / default_max;
        let defaults = ScoringWeights::default();
        let weights = ScoringWeights {
            destination_exact: self.destination,
            destination_partial: scale(self.destination, 40, defaults.destination_partial),
            destination_pattern: scale(self.destination, 40, defaults.destination_pattern),
            dates_full: self.dates,
            dates_most: scale(self.dates, 25, defaults.dates_most),
            dates_some: scale(self.dates, 25, defaults.dates_some),
            budget_close: self.budget,
            budget_near: scale(self.budget, 10, defaults.budget_near),
            per_interest: scale(self.interests, 20, defaults.per_interest),
            interests_max: self.interests,
            travel_style: self.travel_style,
        };

        // A factor that is enabled must keep every tier worth at least a point
        let tiers = [
            ("destination", self.destination, weights.destination_pattern),
            ("dates", self.dates, weights.dates_some),
            ("budget", self.budget, weights.budget_near),
            ("interests", self.interests, weights.per_interest),
        ];
        if let Some((name, max, _)) = tiers.into_iter().find(|(_, max, lowest)| *max > 0 && *lowest == 0) {
            return Err(ConfigError::Message(format!(
                "scoring weight for {} is too small to keep its lower tiers: {}",
                name, max
            )));
        }

        Ok(weights)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuotaSettings {
    #[serde(default = "default_max_trips_created")]
    pub max_trips_created: u32,
    #[serde(default = "default_max_trips_joined")]
    pub max_trips_joined: u32,
}

impl Default for QuotaSettings {
    fn default() -> Self {
        Self {
            max_trips_created: default_max_trips_created(),
            max_trips_joined: default_max_trips_joined(),
        }
    }
}

impl QuotaSettings {
    pub fn limits(&self) -> UsageLimits {
        UsageLimits {
            max_trips_created: self.max_trips_created,
            max_trips_joined: self.max_trips_joined,
        }
    }
}

fn default_max_trips_created() -> u32 { UsageLimits::default().max_trips_created }
fn default_max_trips_joined() -> u32 { UsageLimits::default().max_trips_joined }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn env_source() -> Environment {
    Environment::with_prefix("TRIPMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TRIPMATCH__)
    /// 5. DATABASE_URL and JWT_SECRET
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TRIPMATCH__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        let settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known unprefixed variables on top of the loaded config
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(secret) = env::var("JWT_SECRET") {
        builder = builder.set_override("auth.jwt_secret", secret)?;
    }
    if let Ok(redis_url) = env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", redis_url)?;
    }

    builder.build()
}

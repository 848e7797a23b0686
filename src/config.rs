use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Redis connection URL; state is kept in memory when unset
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Simulated latency of the login round-trip, in milliseconds
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,

    /// Length of the "for you" recommendation list
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Length of the achievement-driven recommendation list
    #[serde(default = "default_achievement_recommendation_count")]
    pub achievement_recommendation_count: usize,

    /// Fallback tracing filter when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_login_delay_ms() -> u64 {
    500
}

fn default_recommendation_count() -> usize {
    6
}

fn default_achievement_recommendation_count() -> usize {
    5
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            login_delay_ms: default_login_delay_ms(),
            recommendation_count: default_recommendation_count(),
            achievement_recommendation_count: default_achievement_recommendation_count(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from an explicit list of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

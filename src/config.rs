use serde::Deserialize;

/// Engine configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Minimum predicted mark a candidate must strictly exceed to be recommended
    #[serde(default = "default_recommendation_threshold")]
    pub recommendation_threshold: f64,

    /// Lower bound of the mark scale
    #[serde(default = "default_mark_min")]
    pub mark_min: i32,

    /// Upper bound of the mark scale
    #[serde(default = "default_mark_max")]
    pub mark_max: i32,
}

fn default_recommendation_threshold() -> f64 {
    5.0
}

fn default_mark_min() -> i32 {
    1
}

fn default_mark_max() -> i32 {
    10
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            recommendation_threshold: default_recommendation_threshold(),
            mark_min: default_mark_min(),
            mark_max: default_mark_max(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<EngineConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "car-price-predictor.json";

pub const DEFAULT_DATASET: &str = "public/Cleaned_Car_data.csv";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset location: a filesystem path or an `http(s)://` URL.
    pub dataset: String,
    /// Scoring service root; requests go to `<api_base_url>/predict`.
    pub api_base_url: String,
    pub currency_symbol: String,
    /// Overall request timeout. `None` leaves the transport defaults alone.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DEFAULT_DATASET.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            currency_symbol: "₹".to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load [`CONFIG_FILE`] from the working directory, falling back to the
    /// defaults when it is absent or unusable.
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).context("reading config file")?;
        serde_json::from_str(&text).context("parsing config JSON")
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.api_base_url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

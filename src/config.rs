use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Env var naming the config file to load.
const CONFIG_PATH_ENV: &str = "KVADRAT_CONFIG";

/// Optional comma-separated override of the cities to report on.
const CITIES_ENV: &str = "KVADRAT_CITIES";

const DEFAULT_CONFIG_PATH: &str = "config.json";

/// The run configuration, loaded once and passed around by reference.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub source_url: String,
    /// Lowercase city name to source region code, in file order.
    pub cities: IndexMap<String, String>,
    pub start_year: i32,
    pub inflation_adjustment_year: i32,
    pub destination_folder: PathBuf,
    pub cpi_series: PathBuf,
    /// Whether downstream visualisations should hide district-level series.
    /// Read-only input here; report generation ignores it.
    #[serde(default)]
    pub hide_districts: bool,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("malformed config file {}", path.display()))?;
        Ok(config)
    }

    /// Cities this run reports on: the env override when set and non-empty,
    /// otherwise every configured city in file order.
    pub fn report_cities(&self) -> Vec<String> {
        env::var(CITIES_ENV)
            .ok()
            .map(|raw| parse_city_list(&raw))
            .filter(|cities| !cities.is_empty())
            .unwrap_or_else(|| self.cities.keys().cloned().collect())
    }
}

fn parse_city_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|city| city.trim().to_lowercase())
        .filter(|city| !city.is_empty())
        .collect()
}

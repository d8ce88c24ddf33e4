/// Collector configuration loader - parses collector.toml
///
/// All tunables live in one immutable struct built once at startup and
/// passed by reference into each component; nothing reads configuration
/// ambiently. The API credential can live in the file but is normally
/// supplied via the WU_API_KEY environment variable (a .env file is
/// honored).

use serde::Deserialize;
use std::env;
use std::fs;

/// Root configuration, one per run.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub api: ApiConfig,
    pub query: QueryConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Live-vs-replay transport behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// false answers every request from the cached last response instead of
    /// the network - useful for iterating on parsing without burning API quota
    #[serde(default = "default_true")]
    pub live: bool,
    /// Save each live response body for later replay
    #[serde(default = "default_true")]
    pub cache_responses: bool,
    #[serde(default = "default_cache_path")]
    pub cache_path: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            live: true,
            cache_responses: true,
            cache_path: default_cache_path(),
        }
    }
}

/// Provider endpoint settings. Queries are built as
/// `<base_url>/<api_key>/<operation>/q/<spec>.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Normally left unset here and supplied via WU_API_KEY instead, so the
    /// credential stays out of version control
    pub api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            api_key: None,
        }
    }
}

/// What to search for and how much of it to keep.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Lat/lon pair, ZIP, or any other location spec the provider accepts
    pub location: String,
    /// Candidates farther than this are dropped before extraction
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
    /// At most this many stations are queried for conditions per run - the
    /// developer-tier credential has per-minute and per-day call quotas
    #[serde(default = "default_max_stations")]
    pub max_stations: usize,
}

/// Table names and storage-side toggles. The connection string itself comes
/// from DATABASE_URL.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_station_table")]
    pub station_table: String,
    #[serde(default = "default_observation_table")]
    pub observation_table: String,
    /// Drops and recreates both tables. Only useful for debug or schema
    /// changes, otherwise the tables should remain untouched.
    #[serde(default)]
    pub reset_tables: bool,
    /// Read back and print stored observations after the run
    #[serde(default = "default_true")]
    pub dump_after_run: bool,
    /// Print each SQL statement before executing it
    #[serde(default = "default_true")]
    pub verbose: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            station_table: default_station_table(),
            observation_table: default_observation_table(),
            reset_tables: false,
            dump_after_run: true,
            verbose: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cache_path() -> String {
    "last_response.json".to_string()
}

fn default_base_url() -> String {
    "http://api.wunderground.com/api".to_string()
}

fn default_max_distance_km() -> f64 {
    3.0
}

fn default_max_stations() -> usize {
    2
}

fn default_station_table() -> String {
    "pws_nearby".to_string()
}

fn default_observation_table() -> String {
    "weather_nearby".to_string()
}

impl CollectorConfig {
    /// Resolves the API credential: WU_API_KEY from the environment (or a
    /// .env file) wins over the config file entry.
    pub fn api_key(&self) -> Option<String> {
        dotenv::dotenv().ok();
        env::var("WU_API_KEY").ok().or_else(|| self.api.api_key.clone())
    }
}

/// Loads configuration from collector.toml in the working directory.
///
/// # Panics
/// Panics if the file is missing or malformed. This is intentional - the
/// collector cannot do anything useful without a location to query.
pub fn load_config() -> CollectorConfig {
    load_config_from("collector.toml")
}

pub fn load_config_from(path: &str) -> CollectorConfig {
    let contents = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));

    toml::from_str(&contents)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path, e))
}

use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory holding `shops.csv`, `products.csv`, `taggings.csv` and `tags.csv`.
    pub data_path: PathBuf,
    /// Geohash length of the spatial index, fixed for the process lifetime.
    pub geohash_precision: usize,
    /// Search radius in meters used when a request does not name one.
    pub default_radius_m: f64,
    pub default_limit: i64,
    /// Upper bound applied to requested limits by the HTTP layer.
    pub max_limit: i64,
}

//! Domain types, distance math, errors and process configuration shared by
//! every `shopgeo` crate.

mod app_config;
mod config;
mod error;
pub mod geo;
pub mod model;
pub mod rows;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use geo::{
    haversine_km, Coordinate, DEFAULT_GEOHASH_PRECISION, EARTH_RADIUS_KM, MAX_GEOHASH_PRECISION,
};
pub use model::{Product, Shop, Tag};
pub use rows::{ProductRow, ShopRow, TagRow, TaggingRow};

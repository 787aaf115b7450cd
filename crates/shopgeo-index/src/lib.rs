//! In-memory geospatial search over shops and their products.
//!
//! Shops are bucketed by geohash in a [`GridIndex`]. A radius query scans the
//! center cell and its eight neighbors, filters by exact haversine distance
//! and optionally by tag, then [`SearchEngine::search`] joins each matching
//! shop's products and ranks them by popularity.
//!
//! Everything is built once and read concurrently afterwards; per-query data
//! such as the distance to the center lives in [`ShopHit`] and
//! [`ProductHit`], never in the catalogs.

pub mod catalog;
mod engine;
mod filter;
pub mod geohash;
pub mod grid;

pub use catalog::{ProductCatalog, ProductHit, ShopCatalog, ShopHit, TagCatalog};
pub use engine::{SearchEngine, SearchQuery, SearchResults};
pub use filter::TagFilter;
pub use geohash::GeoHash;
pub use grid::GridIndex;

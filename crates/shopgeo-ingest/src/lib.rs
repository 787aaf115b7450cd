//! Loads the shop, product and tag CSV files of a data directory and builds a
//! [`SearchEngine`] over them.
//!
//! Each file needs a header row. Columns are matched by name, so extra
//! columns (a tagging's own `id`, for instance) are ignored.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use shopgeo_core::{CoreError, ProductRow, ShopRow, TagRow, TaggingRow};
use shopgeo_index::{ProductCatalog, SearchEngine, ShopCatalog, TagCatalog};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read data file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV file '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Locations of the four data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub shops: PathBuf,
    pub products: PathBuf,
    /// Optional; a missing file means no shop carries any tag.
    pub taggings: PathBuf,
    /// Optional; a missing file means an empty tag listing.
    pub tags: PathBuf,
}

impl DataFiles {
    /// The conventional file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            shops: dir.join("shops.csv"),
            products: dir.join("products.csv"),
            taggings: dir.join("taggings.csv"),
            tags: dir.join("tags.csv"),
        }
    }
}

/// Deserializes every record of the CSV file at `path`.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be opened and
/// [`IngestError::Csv`] if a record is malformed.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;

    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file)
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| IngestError::Csv {
            path: path.display().to_string(),
            source,
        })
}

/// Like [`read_rows`], but a file that does not exist yields no rows.
///
/// # Errors
///
/// Same as [`read_rows`] for any failure other than a missing file.
pub fn read_optional_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, IngestError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "optional data file not found");
        return Ok(Vec::new());
    }
    read_rows(path)
}

/// Reads all data files and builds the engine, indexing shops at
/// `precision` geohash characters.
///
/// # Errors
///
/// Returns [`IngestError`] if a required file is missing or malformed, or
/// [`IngestError::Core`] if the rows fail catalog validation. Nothing is
/// returned half-built.
pub fn load_engine(files: &DataFiles, precision: usize) -> Result<SearchEngine, IngestError> {
    let shop_rows: Vec<ShopRow> = read_rows(&files.shops)?;
    let product_rows: Vec<ProductRow> = read_rows(&files.products)?;
    let tagging_rows: Vec<TaggingRow> = read_optional_rows(&files.taggings)?;
    let tag_rows: Vec<TagRow> = read_optional_rows(&files.tags)?;

    tracing::info!(
        shops = shop_rows.len(),
        products = product_rows.len(),
        taggings = tagging_rows.len(),
        tags = tag_rows.len(),
        "read data files"
    );

    let shops = ShopCatalog::load(shop_rows, tagging_rows, precision)?;
    let products = ProductCatalog::load(product_rows)?;
    let tags = TagCatalog::load(tag_rows)?;

    tracing::info!(
        precision,
        buckets = shops.grid_bucket_count(),
        "built shop grid index"
    );

    Ok(SearchEngine::new(shops, products, tags))
}

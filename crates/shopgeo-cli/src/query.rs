//! Command handlers for `search` and `stats`.
//!
//! Both load the whole data directory on every invocation; there is no
//! persisted index to reuse.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use shopgeo_core::Coordinate;
use shopgeo_index::{SearchEngine, SearchQuery, TagFilter};
use shopgeo_ingest::{load_engine, DataFiles};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchArgs {
    pub lat: f64,
    pub lng: f64,
    pub radius_km: f64,
    pub tags: Option<String>,
    pub limit: i64,
}

impl SearchArgs {
    pub(crate) fn to_query(&self) -> anyhow::Result<SearchQuery> {
        let center = Coordinate::new(self.lat, self.lng);
        center.validate()?;

        let query = SearchQuery::new(center, self.radius_km, self.limit);
        Ok(match self.tags.as_deref().map(TagFilter::parse_csv) {
            Some(filter) if !filter.is_empty() => query.with_tags(filter),
            _ => query,
        })
    }
}

fn load(data_dir: &Path, precision: usize) -> anyhow::Result<SearchEngine> {
    tracing::debug!(data_dir = %data_dir.display(), precision, "loading data directory");
    load_engine(&DataFiles::in_dir(data_dir), precision)
        .with_context(|| format!("failed to load data from {}", data_dir.display()))
}

/// Runs one search and writes the `{count, products}` response as JSON.
pub(crate) fn run_search(
    data_dir: &Path,
    precision: usize,
    args: &SearchArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let query = args.to_query()?;
    let engine = load(data_dir, precision)?;
    let results = engine.search(&query)?;
    tracing::debug!(returned = results.count, "search finished");

    serde_json::to_writer_pretty(&mut *out, &results)?;
    writeln!(out)?;
    Ok(())
}

/// Writes catalog sizes and grid occupancy as JSON.
pub(crate) fn run_stats(
    data_dir: &Path,
    precision: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let engine = load(data_dir, precision)?;
    let stats = serde_json::json!({
        "shops": engine.shops().len(),
        "products": engine.products().len(),
        "tags": engine.tags().len(),
        "grid_precision": engine.shops().grid_precision(),
        "grid_buckets": engine.shops().grid_bucket_count(),
    });

    serde_json::to_writer_pretty(&mut *out, &stats)?;
    writeln!(out)?;
    Ok(())
}

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use shopgeo_core::{Coordinate, CoreError, Shop, ShopRow, TaggingRow};

use crate::filter::TagFilter;
use crate::grid::GridIndex;

/// A shop matched by a radius query, with its distance to the query center.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ShopHit<'a> {
    #[serde(flatten)]
    pub shop: &'a Shop,
    pub distance_km: f64,
}

/// Nearest first, then id. Distances are finite, so `-0.0` ties with `0.0`.
fn by_distance(a: &ShopHit<'_>, b: &ShopHit<'_>) -> Ordering {
    a.distance_km
        .partial_cmp(&b.distance_km)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.shop.id.cmp(&b.shop.id))
}

/// Shops by id, spatially indexed by location.
#[derive(Debug, Clone)]
pub struct ShopCatalog {
    shops: Vec<Shop>,
    by_id: HashMap<String, usize>,
    grid: GridIndex<usize>,
}

impl ShopCatalog {
    /// Builds the catalog from shop rows and tag memberships, indexing shop
    /// locations at `precision` geohash characters.
    ///
    /// Memberships naming an unknown shop, or missing either id, are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DataIntegrity`] if a shop row is missing a field,
    /// has a non-numeric coordinate, or repeats a shop id, and
    /// [`CoreError::InvalidPrecision`] for a precision outside `1..=12`.
    pub fn load<S, T>(shop_rows: S, taggings: T, precision: usize) -> Result<Self, CoreError>
    where
        S: IntoIterator<Item = ShopRow>,
        T: IntoIterator<Item = TaggingRow>,
    {
        let mut grid = GridIndex::new(precision)?;
        let mut shops: Vec<Shop> = Vec::new();
        let mut by_id = HashMap::new();

        for (idx, row) in shop_rows.into_iter().enumerate() {
            let shop = row.into_shop(idx + 1)?;
            if by_id.contains_key(&shop.id) {
                return Err(CoreError::DataIntegrity {
                    entity: "shop",
                    row: idx + 1,
                    reason: format!("duplicate shop id '{}'", shop.id),
                });
            }
            by_id.insert(shop.id.clone(), shops.len());
            shops.push(shop);
        }

        let mut ignored = 0_usize;
        for (shop_id, tag_id) in taggings.into_iter().filter_map(TaggingRow::into_pair) {
            match by_id.get(&shop_id) {
                Some(&idx) => {
                    shops[idx].tags.insert(tag_id);
                }
                None => ignored += 1,
            }
        }
        if ignored > 0 {
            tracing::debug!(ignored, "skipped taggings for unknown shops");
        }

        for (idx, shop) in shops.iter().enumerate() {
            grid.insert(shop.location, idx);
        }

        Ok(Self { shops, by_id, grid })
    }

    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&Shop> {
        self.by_id.get(id).map(|&idx| &self.shops[idx])
    }

    /// Shops within `radius_km` of `center`, nearest first (ties by id).
    ///
    /// A `None` or empty `tags` filter keeps every shop; otherwise a shop
    /// must carry at least one of the tags.
    #[must_use]
    pub fn within_radius(
        &self,
        center: Coordinate,
        radius_km: f64,
        tags: Option<&TagFilter>,
    ) -> Vec<ShopHit<'_>> {
        let filter = tags.filter(|f| !f.is_empty());

        let mut hits: Vec<ShopHit<'_>> = self
            .grid
            .query_radius(center, radius_km)
            .map(|(&idx, distance_km)| ShopHit {
                shop: &self.shops[idx],
                distance_km,
            })
            .filter(|hit| filter.is_none_or(|f| f.matches(hit.shop)))
            .collect();

        hits.sort_by(by_distance);
        hits
    }

    /// Same as [`Self::within_radius`].
    #[must_use]
    pub fn shops_within_radius(
        &self,
        center: Coordinate,
        radius_km: f64,
        tags: Option<&TagFilter>,
    ) -> Vec<ShopHit<'_>> {
        self.within_radius(center, radius_km, tags)
    }

    /// See [`GridIndex::exact_radius_km`].
    #[must_use]
    pub fn exact_radius_km(&self, center: Coordinate) -> f64 {
        self.grid.exact_radius_km(center)
    }

    /// Shops in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Shop> {
        self.shops.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }

    #[must_use]
    pub fn grid_precision(&self) -> usize {
        self.grid.precision()
    }

    #[must_use]
    pub fn grid_bucket_count(&self) -> usize {
        self.grid.bucket_count()
    }
}

#[cfg(test)]
#[path = "shops_test.rs"]
mod tests;

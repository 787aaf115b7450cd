use std::cmp::Ordering;

use serde::Serialize;
use shopgeo_core::{Coordinate, CoreError};

use crate::catalog::{ProductCatalog, ProductHit, ShopCatalog, TagCatalog};
use crate::filter::TagFilter;

/// Parameters of a single product search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub center: Coordinate,
    pub radius_km: f64,
    /// `None` or an empty filter keeps every shop in range.
    pub tags: Option<TagFilter>,
    /// Maximum number of products returned; zero or negative yields none.
    pub limit: i64,
}

impl SearchQuery {
    #[must_use]
    pub fn new(center: Coordinate, radius_km: f64, limit: i64) -> Self {
        Self {
            center,
            radius_km,
            tags: None,
            limit,
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: TagFilter) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// Ranked products of one search. `count` always equals `products.len()`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<'a> {
    pub count: usize,
    pub products: Vec<ProductHit<'a>>,
}

impl SearchResults<'_> {
    fn empty() -> Self {
        Self {
            count: 0,
            products: Vec::new(),
        }
    }
}

/// Owns every catalog for the lifetime of the process and answers searches
/// against them. Read-only after construction, so a single instance can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    shops: ShopCatalog,
    products: ProductCatalog,
    tags: TagCatalog,
}

impl SearchEngine {
    #[must_use]
    pub fn new(shops: ShopCatalog, products: ProductCatalog, tags: TagCatalog) -> Self {
        Self {
            shops,
            products,
            tags,
        }
    }

    #[must_use]
    pub fn shops(&self) -> &ShopCatalog {
        &self.shops
    }

    #[must_use]
    pub fn products(&self) -> &ProductCatalog {
        &self.products
    }

    #[must_use]
    pub fn tags(&self) -> &TagCatalog {
        &self.tags
    }

    /// Products of shops within the query radius, most popular first (ties
    /// by product id), truncated to the query limit.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidQuery`] if the radius is negative or not a
    /// finite number.
    pub fn search(&self, query: &SearchQuery) -> Result<SearchResults<'_>, CoreError> {
        if !query.radius_km.is_finite() || query.radius_km < 0.0 {
            return Err(CoreError::InvalidQuery(format!(
                "radius must be a non-negative number of kilometers, got {}",
                query.radius_km
            )));
        }

        let exact_radius_km = self.shops.exact_radius_km(query.center);
        if query.radius_km > exact_radius_km {
            tracing::debug!(
                radius_km = query.radius_km,
                exact_radius_km,
                "radius exceeds grid neighborhood; results may be incomplete"
            );
        }

        let Some(limit) = effective_limit(query.limit) else {
            return Ok(SearchResults::empty());
        };

        let shops = self
            .shops
            .within_radius(query.center, query.radius_km, query.tags.as_ref());
        let shop_count = shops.len();

        let mut products: Vec<ProductHit<'_>> =
            self.products.products_in_shops(shops).collect();
        let candidates = products.len();

        if limit < products.len() {
            products.select_nth_unstable_by(limit, by_rank);
            products.truncate(limit);
        }
        products.sort_by(by_rank);

        tracing::debug!(
            shops = shop_count,
            candidates,
            returned = products.len(),
            "search complete"
        );

        Ok(SearchResults {
            count: products.len(),
            products,
        })
    }
}

fn effective_limit(limit: i64) -> Option<usize> {
    if limit <= 0 {
        return None;
    }
    Some(usize::try_from(limit).unwrap_or(usize::MAX))
}

/// Popularity descending, then id. Loading rejects non-finite popularity, so
/// `partial_cmp` only sees comparable values and `-0.0` ties with `0.0`.
fn by_rank(a: &ProductHit<'_>, b: &ProductHit<'_>) -> Ordering {
    b.product
        .popularity
        .partial_cmp(&a.product.popularity)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.product.id.cmp(&b.product.id))
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;

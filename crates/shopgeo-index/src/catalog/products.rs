use std::collections::{HashMap, HashSet};

use serde::Serialize;
use shopgeo_core::{CoreError, Product, ProductRow};

use super::shops::ShopHit;

/// A product paired with the shop hit that carries it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProductHit<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub shop: ShopHit<'a>,
}

/// Products grouped by owning shop id.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    by_shop: HashMap<String, Vec<Product>>,
    len: usize,
}

impl ProductCatalog {
    /// # Errors
    ///
    /// Returns [`CoreError::DataIntegrity`] if a row is missing a field, has a
    /// non-numeric popularity or quantity, or repeats a product id.
    pub fn load<I>(rows: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = ProductRow>,
    {
        let mut by_shop: HashMap<String, Vec<Product>> = HashMap::new();
        let mut seen = HashSet::new();

        for (idx, row) in rows.into_iter().enumerate() {
            let product = row.into_product(idx + 1)?;
            if !seen.insert(product.id.clone()) {
                return Err(CoreError::DataIntegrity {
                    entity: "product",
                    row: idx + 1,
                    reason: format!("duplicate product id '{}'", product.id),
                });
            }
            by_shop
                .entry(product.shop_id.clone())
                .or_default()
                .push(product);
        }

        Ok(Self {
            by_shop,
            len: seen.len(),
        })
    }

    /// Products of one shop in load order; empty for unknown shops.
    #[must_use]
    pub fn for_shop(&self, shop_id: &str) -> &[Product] {
        self.by_shop
            .get(shop_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Lazily yields the products of each shop in `shops`, in shop order,
    /// each annotated with its shop hit.
    pub fn products_in_shops<'a, I>(&'a self, shops: I) -> impl Iterator<Item = ProductHit<'a>> + 'a
    where
        I: IntoIterator<Item = ShopHit<'a>>,
        I::IntoIter: 'a,
    {
        shops.into_iter().flat_map(move |shop| {
            self.for_shop(&shop.shop.id)
                .iter()
                .map(move |product| ProductHit { product, shop })
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of shops with at least one product.
    #[must_use]
    pub fn shop_count(&self) -> usize {
        self.by_shop.len()
    }
}

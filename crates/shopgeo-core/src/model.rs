use std::collections::BTreeSet;

use serde::Serialize;

use crate::geo::Coordinate;

/// A shop as held by the shop catalog. Immutable once loaded; the distance
/// to a query center is carried by the query's own result values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shop {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub location: Coordinate,
    /// Tag ids attached to this shop. May be empty.
    pub tags: BTreeSet<String>,
}

impl Shop {
    /// Returns `true` if the shop carries `tag_id`.
    #[must_use]
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.contains(tag_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: String,
    pub shop_id: String,
    pub title: String,
    /// Opaque ranking score; higher ranks first.
    pub popularity: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

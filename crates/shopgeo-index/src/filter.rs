use std::collections::BTreeSet;

use shopgeo_core::Shop;

/// A set of tag ids a shop must intersect to pass (logical OR).
///
/// An empty filter applies no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter(BTreeSet<String>);

impl TagFilter {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tags.into_iter().collect()
    }

    /// Splits a comma-separated list, trimming entries and dropping blanks.
    #[must_use]
    pub fn parse_csv(raw: &str) -> Self {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns `true` if `shop` carries at least one of the filter's tags.
    #[must_use]
    pub fn matches(&self, shop: &Shop) -> bool {
        if shop.tags.len() <= self.0.len() {
            shop.tags.iter().any(|t| self.0.contains(t))
        } else {
            self.0.iter().any(|t| shop.tags.contains(t))
        }
    }
}

impl<S: Into<String>> FromIterator<S> for TagFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

use std::collections::BTreeMap;

use shopgeo_core::{CoreError, Tag, TagRow};

/// Tag display names by id. Query logic only ever sees tag ids; this catalog
/// exists for listing.
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    tags: BTreeMap<String, Tag>,
}

impl TagCatalog {
    /// # Errors
    ///
    /// Returns [`CoreError::DataIntegrity`] if a row has no id or repeats an id.
    pub fn load<I>(rows: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = TagRow>,
    {
        let mut tags = BTreeMap::new();
        for (idx, row) in rows.into_iter().enumerate() {
            let tag = row.into_tag(idx + 1)?;
            if tags.contains_key(&tag.id) {
                return Err(CoreError::DataIntegrity {
                    entity: "tag",
                    row: idx + 1,
                    reason: format!("duplicate tag id '{}'", tag.id),
                });
            }
            tags.insert(tag.id.clone(), tag);
        }
        Ok(Self { tags })
    }

    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&Tag> {
        self.tags.get(id)
    }

    #[must_use]
    pub fn name(&self, id: &str) -> Option<&str> {
        self.tags.get(id).map(|t| t.name.as_str())
    }

    /// All tags ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_orders_by_id() {
        let catalog = TagCatalog::load([TagRow::new("t2", "Shoes"), TagRow::new("t1", "Books")])
            .expect("valid rows");
        let ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
        assert_eq!(catalog.name("t2"), Some("Shoes"));
        assert_eq!(catalog.name("t3"), None);
    }

    #[test]
    fn load_rejects_duplicate_id() {
        let err = TagCatalog::load([TagRow::new("t1", "A"), TagRow::new("t1", "B")]).unwrap_err();
        assert!(
            matches!(err, CoreError::DataIntegrity { entity: "tag", row: 2, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn empty_input_is_empty_catalog() {
        let catalog = TagCatalog::load(Vec::new()).unwrap();
        assert!(catalog.is_empty());
    }
}

//! Raw load rows and their conversion into domain records.
//!
//! Every field is an optional string so that a missing column and an empty
//! cell look the same to validation. Conversion trims whitespace and treats a
//! blank value as missing.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::geo::Coordinate;
use crate::model::{Product, Shop, Tag};
use crate::CoreError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopRow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductRow {
    pub id: Option<String>,
    pub shop_id: Option<String>,
    pub title: Option<String>,
    pub popularity: Option<String>,
    pub quantity: Option<String>,
}

/// One shop-to-tag membership. Extra columns (such as a tagging id) are
/// ignored by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaggingRow {
    pub shop_id: Option<String>,
    pub tag_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagRow {
    pub id: Option<String>,
    #[serde(alias = "tag")]
    pub name: Option<String>,
}

impl ShopRow {
    #[must_use]
    pub fn new(id: &str, name: &str, lat: &str, lng: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            lat: Some(lat.to_string()),
            lng: Some(lng.to_string()),
        }
    }

    /// Converts the row into a [`Shop`] with an empty tag set.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DataIntegrity`] if `id`, `name`, `lat` or `lng` is
    /// missing, or if a coordinate is not a finite number.
    pub fn into_shop(self, row: usize) -> Result<Shop, CoreError> {
        let field = Field::new("shop", row);
        let id = field.required("id", self.id)?;
        let name = field.required("name", self.name)?;
        let lat = field.finite("lat", self.lat)?;
        let lng = field.finite("lng", self.lng)?;

        Ok(Shop {
            id,
            name,
            location: Coordinate::new(lat, lng),
            tags: BTreeSet::new(),
        })
    }
}

impl ProductRow {
    #[must_use]
    pub fn new(id: &str, shop_id: &str, title: &str, popularity: &str, quantity: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            shop_id: Some(shop_id.to_string()),
            title: Some(title.to_string()),
            popularity: Some(popularity.to_string()),
            quantity: Some(quantity.to_string()),
        }
    }

    /// Converts the row into a [`Product`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DataIntegrity`] if any field is missing, if
    /// `popularity` is not a finite number, or if `quantity` is not a
    /// non-negative whole number.
    pub fn into_product(self, row: usize) -> Result<Product, CoreError> {
        let field = Field::new("product", row);
        let id = field.required("id", self.id)?;
        let shop_id = field.required("shop_id", self.shop_id)?;
        let title = field.required("title", self.title)?;
        let popularity = field.finite("popularity", self.popularity)?;
        let quantity = field.quantity(self.quantity)?;

        Ok(Product {
            id,
            shop_id,
            title,
            popularity,
            quantity,
        })
    }
}

impl TaggingRow {
    #[must_use]
    pub fn new(shop_id: &str, tag_id: &str) -> Self {
        Self {
            shop_id: Some(shop_id.to_string()),
            tag_id: Some(tag_id.to_string()),
        }
    }

    /// Returns `(shop_id, tag_id)` when both are present and non-blank.
    #[must_use]
    pub fn into_pair(self) -> Option<(String, String)> {
        Some((non_blank(self.shop_id)?, non_blank(self.tag_id)?))
    }
}

impl TagRow {
    #[must_use]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
        }
    }

    /// Converts the row into a [`Tag`]. A missing name falls back to the id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DataIntegrity`] if `id` is missing.
    pub fn into_tag(self, row: usize) -> Result<Tag, CoreError> {
        let id = Field::new("tag", row).required("id", self.id)?;
        let name = non_blank(self.name).unwrap_or_else(|| id.clone());
        Ok(Tag { id, name })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Field-level validation bound to one row of one entity.
struct Field {
    entity: &'static str,
    row: usize,
}

impl Field {
    fn new(entity: &'static str, row: usize) -> Self {
        Self { entity, row }
    }

    fn error(&self, reason: String) -> CoreError {
        CoreError::DataIntegrity {
            entity: self.entity,
            row: self.row,
            reason,
        }
    }

    fn required(&self, name: &str, value: Option<String>) -> Result<String, CoreError> {
        non_blank(value).ok_or_else(|| self.error(format!("missing required field '{name}'")))
    }

    fn finite(&self, name: &str, value: Option<String>) -> Result<f64, CoreError> {
        let raw = self.required(name, value)?;
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.error(format!("field '{name}' is not a finite number: '{raw}'"))),
        }
    }

    /// Whole numbers written as floats (`"3.0"`) are accepted.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn quantity(&self, value: Option<String>) -> Result<u32, CoreError> {
        let raw = self.required("quantity", value)?;
        if let Ok(v) = raw.parse::<u32>() {
            return Ok(v);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) => {
                Ok(v as u32)
            }
            _ => Err(self.error(format!(
                "field 'quantity' is not a non-negative integer: '{raw}'"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "rows_test.rs"]
mod tests;
